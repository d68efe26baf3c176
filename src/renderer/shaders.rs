//! Embedded GLSL sources. The scene shader indexes a fixed-size material
//! array with the per-vertex material id; id 11 is the paintings surface and
//! is the only one sampling the diffuse texture.

pub const SCENE_VS: &str = r#"#version 330 core
layout(location = 0) in vec3 aPosition;
layout(location = 1) in vec3 aNormal;
layout(location = 2) in vec2 aTexCoord;
layout(location = 3) in int aMaterial;

out vec3 fPosition;
out vec3 fNormal;
out vec2 fTexCoord;
out vec4 fPositionLightSpace;
flat out int material_id;

uniform mat4 model;
uniform mat4 view;
uniform mat4 projection;
uniform mat4 lightSpaceMatrix;

void main() {
    fPosition = vec3(model * vec4(aPosition, 1.0f));
    fPositionLightSpace = lightSpaceMatrix * vec4(fPosition, 1.0f);
    fNormal = mat3(transpose(inverse(model))) * aNormal;
    fTexCoord = aTexCoord;
    gl_Position = projection * view * model * vec4(aPosition, 1.0f);
    material_id = aMaterial;
}
"#;

pub const SCENE_FS: &str = r#"#version 330 core
in vec3 fPosition;
in vec3 fNormal;
in vec2 fTexCoord;
in vec4 fPositionLightSpace;
flat in int material_id;
out vec4 color;

struct AmbientLight {
    vec3 color;
    float intensity;
};

struct DirectionalLight {
    vec3 direction;
    float intensity;
    vec3 color;
};

struct SpotLight {
    vec3 position;
    vec3 direction;
    float intensity;
    vec3 color;
    float angle;
    float kc;
    float kl;
    float kq;
};

struct Material {
    vec3 ka;
    vec3 kd;
    vec3 ks;
    float ns;
};

uniform DirectionalLight directionalLight;
uniform SpotLight spotLight;
uniform AmbientLight ambientLight;
uniform vec3 cameraPosition;
uniform Material materials[20];
uniform sampler2D mapKd;
uniform sampler2D shadowMap;
uniform bool shadowsEnabled;

vec3 calcDirectionalLightDiffuse(vec3 normal) {
    vec3 lightDir = normalize(-directionalLight.direction);
    vec3 diffuse = directionalLight.color * max(dot(lightDir, normal), 0.0f) * materials[material_id].kd;
    return directionalLight.intensity * diffuse;
}

vec3 calcDirectionalLightSpecular(vec3 normal) {
    vec3 lightDir = normalize(-directionalLight.direction);
    vec3 reflectDir = reflect(-lightDir, normal);
    vec3 viewDir = cameraPosition - fPosition;
    float spec = pow(max(dot(normalize(viewDir), normalize(reflectDir)), 0.0), materials[material_id].ns);
    return directionalLight.intensity * directionalLight.color * spec * materials[material_id].ks;
}

vec3 calcSpotLightDiffuse(vec3 normal) {
    vec3 lightDir = normalize(spotLight.position - fPosition);
    float theta = acos(-dot(lightDir, normalize(spotLight.direction)));
    if (theta > spotLight.angle) {
        return vec3(0.0f, 0.0f, 0.0f);
    }
    vec3 diffuse = spotLight.color * max(dot(lightDir, normal), 0.0f) * materials[material_id].kd;
    float dist = length(spotLight.position - fPosition);
    float attenuation = 1.0f / (spotLight.kc + spotLight.kl * dist + spotLight.kq * dist * dist);
    return spotLight.intensity * attenuation * diffuse;
}

vec3 calcSpotLightSpecular(vec3 normal) {
    vec3 lightDir = normalize(spotLight.position - fPosition);
    float theta = acos(-dot(lightDir, normalize(spotLight.direction)));
    if (theta > spotLight.angle) {
        return vec3(0.0f, 0.0f, 0.0f);
    }
    vec3 reflectDir = reflect(-lightDir, normal);
    vec3 viewDir = cameraPosition - fPosition;
    float spec = pow(max(dot(normalize(viewDir), normalize(reflectDir)), 0.0), materials[material_id].ns);
    float dist = length(spotLight.position - fPosition);
    float attenuation = 1.0f / (spotLight.kc + spotLight.kl * dist + spotLight.kq * dist * dist);
    return spotLight.intensity * dist * attenuation * spotLight.color * spec * materials[material_id].ks;
}

float shadowCalculation(vec4 fragPosLightSpace) {
    vec3 projCoords = fragPosLightSpace.xyz / fragPosLightSpace.w;
    projCoords = projCoords * 0.5 + 0.5;
    float currentDepth = projCoords.z;
    float bias = 0.000005;
    float shadow = 0.0;
    vec2 texelSize = 1.0 / textureSize(shadowMap, 0);
    for (int x = -1; x <= 1; ++x) {
        for (int y = -1; y <= 1; ++y) {
            float pcfDepth = texture(shadowMap, projCoords.xy + vec2(x, y) * texelSize).r;
            shadow += currentDepth - bias > pcfDepth ? 0.9 : 0.0;
        }
    }
    shadow /= 9.0;
    return shadow;
}

void main() {
    vec3 ambient = materials[material_id].ka * ambientLight.color * ambientLight.intensity;
    vec3 normal = normalize(fNormal);
    vec3 diffuse = calcDirectionalLightDiffuse(normal) + calcSpotLightDiffuse(normal);
    vec3 specular = calcDirectionalLightSpecular(normal) + calcSpotLightSpecular(normal);
    float shadow = shadowCalculation(fPositionLightSpace);
    vec4 coef;
    if (shadowsEnabled)
        coef = vec4(ambient + (1.0 - shadow) * (diffuse + specular), 1.0f);
    else
        coef = vec4(ambient + diffuse + specular, 1.0f);
    color = material_id == 11 ? coef * texture(mapKd, fTexCoord) : coef;
}
"#;

pub const DEPTH_VS: &str = r#"#version 330 core
layout(location = 0) in vec3 aPosition;

uniform mat4 projection;
uniform mat4 view;
uniform mat4 model;

void main() {
    gl_Position = projection * view * model * vec4(aPosition, 1.0f);
}
"#;

pub const DEPTH_FS: &str = r#"#version 330 core
void main() {
}
"#;

pub const SOLID_VS: &str = r#"#version 330 core
layout(location = 0) in vec3 aPosition;
uniform mat4 projection;
uniform mat4 view;
uniform mat4 model;
uniform mat4 rotation;
void main() {
    gl_Position = projection * rotation * view * model * vec4(aPosition, 1.0f);
}
"#;

pub const SOLID_FS: &str = r#"#version 330 core
out vec4 color;
void main() {
    color = vec4(0.941f, 1.0f, 0.941f, 1.0f);
}
"#;

pub const CURVE_VS: &str = r#"#version 330 core
layout(location = 0) in vec2 aPosition;

void main() {
    gl_Position = vec4(aPosition, 0.f, 1.f);
}
"#;

pub const CURVE_FS: &str = r#"#version 330 core
out vec4 color;

uniform vec4 color_in;

void main() {
    color = color_in;
}
"#;
