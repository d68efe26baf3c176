extern crate glfw;

use glfw::fail_on_errors;
use glfw::{Action, Context, Key, MouseButton, WindowEvent};

use crate::app::cli::AppConfig;
use crate::c_str;
use crate::camera::Camera;
use crate::loaders::obj::ObjExporter;
use crate::math::{Matrix4, Point3, Vector2, Vector3};
use crate::nurbs::CurveEditor;
use crate::scene::{default_solids, AmbientLight, DirectionalLight, SceneModel, Solid, SpotLight};

use super::capture::save_screenshot;
use super::curve_gpu::CurveGpu;
use super::framebuffer::DepthFramebuffer;
use super::mesh_gpu::{MeshGpu, SolidGpu};
use super::shader_program::ShaderProgram;
use super::shaders;
use super::texture_gpu::{create_depth_texture, upload_png_texture};

extern crate gl;

const SCR_WIDTH: u32 = 1280;
const SCR_HEIGHT: u32 = 720;
const SHADOW_WIDTH: i32 = 1024;
const SHADOW_HEIGHT: i32 = 1024;

const CAMERA_MOVE_SPEED: f32 = 0.05;
const CAMERA_ROTATE_SPEED: f32 = 0.02;
const CAMERA_ZOOM_RATE: f32 = 0.05;
const WEIGHT_STEP: f32 = 0.1;

/// Maximum entries in the shader's material array.
const MAX_MATERIALS: usize = 20;

const PAINTINGS_TEXTURES: [&str; 3] = [
    "texture/paintings1.png",
    "texture/paintings2.png",
    "texture/paintings3.png",
];
const EXPORT_NAME: &str = "six_basic.obj";
const SCREENSHOT_NAME: &str = "print_screen.bmp";

/// Edge-trigger latches for keys that must fire once per press.
#[derive(Default)]
struct InputState {
    texture_held: bool,
    screenshot_held: bool,
    export_held: bool,
    curve_toggle_held: bool,
    construction_held: bool,
    order_up_held: bool,
    order_down_held: bool,
    weight_up_held: bool,
    weight_down_held: bool,
    shadow_held: bool,
}

struct SolidEntry {
    solid: Solid,
    gpu: SolidGpu,
    vertices: Vec<f32>,
    indices: Vec<u32>,
}

pub fn run(scene_model: SceneModel, config: &AppConfig) -> Result<(), String> {
    let mut glfw =
        glfw::init(fail_on_errors!()).map_err(|e| format!("Failed to initialize GLFW: {}", e))?;
    glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
        glfw::OpenGlProfileHint::Core,
    ));
    #[cfg(target_os = "macos")]
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

    let (mut window, events) = glfw
        .create_window(SCR_WIDTH, SCR_HEIGHT, "LOFT", glfw::WindowMode::Windowed)
        .ok_or_else(|| "Failed to create GLFW window".to_string())?;

    window.make_current();
    window.set_framebuffer_size_polling(true);
    window.set_cursor_pos_polling(true);
    window.set_scroll_polling(true);
    window.set_mouse_button_polling(true);

    gl::load_with(|symbol| glfw.get_proc_address_raw(symbol) as *const _);

    unsafe {
        gl::Enable(gl::DEPTH_TEST);
    }

    let scene_shader = ShaderProgram::from_source(shaders::SCENE_VS, shaders::SCENE_FS)?;
    let depth_shader = ShaderProgram::from_source(shaders::DEPTH_VS, shaders::DEPTH_FS)?;
    let solid_shader = ShaderProgram::from_source(shaders::SOLID_VS, shaders::SOLID_FS)?;
    let curve_shader = ShaderProgram::from_source(shaders::CURVE_VS, shaders::CURVE_FS)?;

    let mesh_gpu = MeshGpu::new(&scene_model.mesh.vertices, &scene_model.mesh.indices);

    let mut solids: Vec<SolidEntry> = default_solids()
        .into_iter()
        .map(|solid| {
            let (vertices, indices) = solid.kind.tessellate();
            SolidEntry {
                gpu: SolidGpu::new(&vertices, &indices),
                solid,
                vertices,
                indices,
            }
        })
        .collect();

    let paintings: Vec<u32> = PAINTINGS_TEXTURES
        .iter()
        .map(|relative| upload_png_texture(&config.asset_dir.join(relative)))
        .collect::<Result<_, _>>()?;
    let mut current_texture = 0usize;

    let depth_map = create_depth_texture(SHADOW_WIDTH, SHADOW_HEIGHT);
    let depth_fbo = DepthFramebuffer::new(depth_map)?;

    let aspect = SCR_WIDTH as f32 / SCR_HEIGHT as f32;
    let center = scene_model.center();
    let mut camera = Camera::new(Point3::new(center.x, center.y, center.z), aspect);

    let ambient_light = AmbientLight::default();
    let directional_light = DirectionalLight::default();
    let spot_light = SpotLight::default();

    let light_projection = Matrix4::ortho(-4.0 * aspect, 4.0 * aspect, -4.0, 4.0, 0.1, 10000.0);
    let light_view = Matrix4::look_at(
        Point3::new(
            directional_light.position.x,
            directional_light.position.y,
            directional_light.position.z,
        ),
        Point3::new(0.0, 0.0, 0.0),
        Vector3::unit_y(),
    );

    let mut editor = CurveEditor::new();
    let curve_gpu = CurveGpu::new();
    let mut curve_enabled = false;
    let mut shadows_enabled = true;
    let mut exporter = ObjExporter::new();

    let mut input_state = InputState::default();
    let mut cursor = Vector2::zero();
    let mut last_cursor = Vector2::zero();
    let mut right_held = false;
    let mut last_frame = 0.0f32;

    while !window.should_close() {
        let current_frame = glfw.get_time() as f32;
        let delta_time = current_frame - last_frame;
        last_frame = current_frame;

        glfw.poll_events();
        for (_, event) in glfw::flush_messages(&events) {
            match event {
                WindowEvent::FramebufferSize(width, height) => unsafe {
                    gl::Viewport(0, 0, width, height);
                    camera.aspect = width.max(1) as f32 / height.max(1) as f32;
                },
                WindowEvent::Scroll(_, y_offset) => {
                    camera.zoom(y_offset as f32, CAMERA_ZOOM_RATE);
                }
                WindowEvent::CursorPos(x, y) => {
                    cursor = Vector2::new(x as f32, y as f32);
                }
                WindowEvent::MouseButton(MouseButton::Right, Action::Press, _) => {
                    if curve_enabled {
                        let (width, height) = window.get_size();
                        editor.click(to_ndc(cursor, width, height));
                    } else {
                        right_held = true;
                    }
                }
                WindowEvent::MouseButton(MouseButton::Right, Action::Release, _) => {
                    right_held = false;
                }
                _ => {}
            }
        }

        // Right-drag look. Drag deltas are in pixels; the rotate speed is in
        // degrees per pixel.
        if right_held {
            let delta = cursor - last_cursor;
            if delta.x != 0.0 || delta.y != 0.0 {
                camera.rotate(
                    (delta.x * CAMERA_ROTATE_SPEED).to_radians(),
                    (-delta.y * CAMERA_ROTATE_SPEED).to_radians(),
                );
            }
        }
        last_cursor = cursor;

        if let Some(action) = process_keys(
            &mut window,
            &mut camera,
            &mut editor,
            &mut input_state,
            &mut curve_enabled,
            &mut shadows_enabled,
            &mut current_texture,
            paintings.len(),
            cursor,
        ) {
            match action {
                PendingAction::Screenshot => {
                    let (width, height) = window.get_framebuffer_size();
                    let path = config.asset_dir.join(SCREENSHOT_NAME);
                    save_screenshot(&path, width, height)?;
                    println!("screen shot has been saved to {}", path.display());
                }
                PendingAction::Export => {
                    for entry in &solids {
                        exporter.add_object(
                            &entry.vertices,
                            &entry.indices,
                            &entry.solid.model_matrix(),
                        );
                    }
                    let path = config.asset_dir.join(EXPORT_NAME);
                    exporter.write_to(&path)?;
                    println!("obj has been saved to {}", path.display());
                }
            }
        }

        // The solids only exist while 6 is held: they trail the camera, spin
        // in place and pulse instead while R is down.
        let show_solids = window.get_key(Key::Num6) == Action::Press;
        if show_solids {
            let pulse = window.get_key(Key::R) == Action::Press;
            let camera_position =
                Vector3::new(camera.position.x, camera.position.y, camera.position.z);
            for entry in &mut solids {
                entry.solid.follow_camera(camera_position);
                if pulse {
                    entry.solid.pulse(delta_time);
                } else {
                    entry.solid.spin(delta_time);
                }
            }
        }

        // Shadow pass: render depth from the directional light with front
        // faces culled to cut self-shadow acne.
        unsafe {
            gl::Viewport(0, 0, SHADOW_WIDTH, SHADOW_HEIGHT);
            depth_fbo.bind();
            gl::Clear(gl::DEPTH_BUFFER_BIT);
            gl::Enable(gl::DEPTH_TEST);
        }
        depth_shader.bind();
        depth_shader.set_mat4(c_str!("projection"), &light_projection);
        depth_shader.set_mat4(c_str!("view"), &light_view);
        depth_shader.set_mat4(c_str!("model"), &Matrix4::identity());
        unsafe {
            gl::Enable(gl::CULL_FACE);
            gl::CullFace(gl::FRONT);
        }
        mesh_gpu.draw();
        unsafe {
            gl::CullFace(gl::BACK);
            gl::Disable(gl::CULL_FACE);
        }
        depth_fbo.unbind();

        // Main pass.
        let (framebuffer_width, framebuffer_height) = window.get_framebuffer_size();
        unsafe {
            gl::Viewport(0, 0, framebuffer_width, framebuffer_height.max(1));
            gl::ClearColor(0.1, 0.1, 0.1, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }

        let projection = camera.projection_matrix();
        let view = camera.view_matrix();

        scene_shader.bind();
        scene_shader.set_mat4(c_str!("projection"), &projection);
        scene_shader.set_mat4(c_str!("view"), &view);
        scene_shader.set_mat4(c_str!("model"), &Matrix4::identity());
        scene_shader.set_mat4(c_str!("lightSpaceMatrix"), &(light_projection * light_view));
        scene_shader.set_bool(c_str!("shadowsEnabled"), shadows_enabled);
        scene_shader.set_vector3(
            c_str!("cameraPosition"),
            &Vector3::new(camera.position.x, camera.position.y, camera.position.z),
        );

        for (i, material) in scene_model.materials.iter().take(MAX_MATERIALS).enumerate() {
            scene_shader.set_vector3_indexed(
                &format!("materials[{}].ka", i),
                &Vector3::new(material.ambient[0], material.ambient[1], material.ambient[2]),
            );
            scene_shader.set_vector3_indexed(
                &format!("materials[{}].kd", i),
                &Vector3::new(material.diffuse[0], material.diffuse[1], material.diffuse[2]),
            );
            scene_shader.set_vector3_indexed(
                &format!("materials[{}].ks", i),
                &Vector3::new(
                    material.specular[0],
                    material.specular[1],
                    material.specular[2],
                ),
            );
            scene_shader.set_float_indexed(&format!("materials[{}].ns", i), material.shininess);
        }

        scene_shader.set_vector3(c_str!("spotLight.position"), &spot_light.position);
        scene_shader.set_vector3(c_str!("spotLight.direction"), &spot_light.direction);
        scene_shader.set_float(c_str!("spotLight.intensity"), spot_light.intensity);
        scene_shader.set_vector3(c_str!("spotLight.color"), &spot_light.color);
        scene_shader.set_float(c_str!("spotLight.angle"), spot_light.angle);
        scene_shader.set_float(c_str!("spotLight.kc"), spot_light.kc);
        scene_shader.set_float(c_str!("spotLight.kl"), spot_light.kl);
        scene_shader.set_float(c_str!("spotLight.kq"), spot_light.kq);
        scene_shader.set_vector3(
            c_str!("directionalLight.direction"),
            &directional_light.direction(),
        );
        scene_shader.set_float(
            c_str!("directionalLight.intensity"),
            directional_light.intensity,
        );
        scene_shader.set_vector3(c_str!("directionalLight.color"), &directional_light.color);
        scene_shader.set_vector3(c_str!("ambientLight.color"), &ambient_light.color);
        scene_shader.set_float(c_str!("ambientLight.intensity"), ambient_light.intensity);

        unsafe {
            gl::ActiveTexture(gl::TEXTURE0);
            gl::BindTexture(gl::TEXTURE_2D, paintings[current_texture]);
            gl::ActiveTexture(gl::TEXTURE1);
            gl::BindTexture(gl::TEXTURE_2D, depth_map);
        }
        scene_shader.set_int(c_str!("mapKd"), 0);
        scene_shader.set_int(c_str!("shadowMap"), 1);

        mesh_gpu.draw();

        if show_solids {
            solid_shader.bind();
            solid_shader.set_mat4(c_str!("projection"), &projection);
            solid_shader.set_mat4(c_str!("view"), &view);
            for entry in &solids {
                let orbit = Matrix4::from_axis_angle(camera.up(), entry.solid.rotate_camera);
                solid_shader.set_mat4(c_str!("rotation"), &orbit);
                solid_shader.set_mat4(c_str!("model"), &entry.solid.model_matrix());
                entry.gpu.draw();
            }
        }

        if curve_enabled {
            curve_gpu.draw(&editor, &curve_shader);
        }

        window.swap_buffers();
    }

    Ok(())
}

enum PendingAction {
    Screenshot,
    Export,
}

/// Continuous camera keys plus the edge-triggered bindings. Screenshot and
/// export bubble up as actions so the render loop can run them with its own
/// state in scope.
#[allow(clippy::too_many_arguments)]
fn process_keys(
    window: &mut glfw::Window,
    camera: &mut Camera,
    editor: &mut CurveEditor,
    input_state: &mut InputState,
    curve_enabled: &mut bool,
    shadows_enabled: &mut bool,
    current_texture: &mut usize,
    texture_count: usize,
    cursor: Vector2,
) -> Option<PendingAction> {
    if window.get_key(Key::Escape) == Action::Press {
        window.set_should_close(true);
        return None;
    }

    if window.get_key(Key::W) == Action::Press {
        camera.move_by(camera.front() * CAMERA_MOVE_SPEED);
    }
    if window.get_key(Key::S) == Action::Press {
        camera.move_by(-camera.front() * CAMERA_MOVE_SPEED);
    }
    if window.get_key(Key::A) == Action::Press {
        camera.move_by(-camera.right() * CAMERA_MOVE_SPEED);
    }
    if window.get_key(Key::D) == Action::Press {
        camera.move_by(camera.right() * CAMERA_MOVE_SPEED);
    }

    let texture_pressed = window.get_key(Key::T) == Action::Press;
    if texture_pressed && !input_state.texture_held && texture_count > 0 {
        *current_texture = (*current_texture + 1) % texture_count;
        println!("change texture");
    }
    input_state.texture_held = texture_pressed;

    let shadow_pressed = window.get_key(Key::M) == Action::Press;
    if shadow_pressed && !input_state.shadow_held {
        *shadows_enabled = !*shadows_enabled;
    }
    input_state.shadow_held = shadow_pressed;

    let curve_pressed = window.get_key(Key::N) == Action::Press;
    if curve_pressed && !input_state.curve_toggle_held {
        *curve_enabled = !*curve_enabled;
    }
    input_state.curve_toggle_held = curve_pressed;

    if *curve_enabled {
        let construction_pressed = window.get_key(Key::G) == Action::Press;
        if construction_pressed && !input_state.construction_held {
            editor.show_construction = !editor.show_construction;
        }
        input_state.construction_held = construction_pressed;

        let order_up = window.get_key(Key::Up) == Action::Press;
        if order_up && !input_state.order_up_held {
            editor.curve.set_order(editor.curve.order() + 1);
        }
        input_state.order_up_held = order_up;

        let order_down = window.get_key(Key::Down) == Action::Press;
        if order_down && !input_state.order_down_held {
            editor.curve.set_order(editor.curve.order().saturating_sub(1));
        }
        input_state.order_down_held = order_down;

        let (width, height) = window.get_size();
        let ndc = to_ndc(cursor, width, height);

        let weight_up = window.get_key(Key::RightBracket) == Action::Press;
        if weight_up && !input_state.weight_up_held {
            if let Some(index) = editor.point_at(ndc) {
                editor.curve.adjust_weight(index, WEIGHT_STEP);
            }
        }
        input_state.weight_up_held = weight_up;

        let weight_down = window.get_key(Key::LeftBracket) == Action::Press;
        if weight_down && !input_state.weight_down_held {
            if let Some(index) = editor.point_at(ndc) {
                editor.curve.adjust_weight(index, -WEIGHT_STEP);
            }
        }
        input_state.weight_down_held = weight_down;
    }

    let screenshot_pressed = window.get_key(Key::P) == Action::Press;
    let mut action = None;
    if screenshot_pressed && !input_state.screenshot_held {
        action = Some(PendingAction::Screenshot);
    }
    input_state.screenshot_held = screenshot_pressed;

    let export_pressed = window.get_key(Key::O) == Action::Press;
    if export_pressed && !input_state.export_held {
        action = Some(PendingAction::Export);
    }
    input_state.export_held = export_pressed;

    action
}

/// Window pixels to normalized device coordinates, Y flipped.
fn to_ndc(cursor: Vector2, width: i32, height: i32) -> Vector2 {
    Vector2::new(
        cursor.x * 2.0 / width.max(1) as f32 - 1.0,
        -(cursor.y * 2.0 / height.max(1) as f32 - 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_conversion_is_centered_and_y_flipped() {
        let center = to_ndc(Vector2::new(400.0, 300.0), 800, 600);
        assert!(center.x.abs() < 1e-6 && center.y.abs() < 1e-6);

        let top_left = to_ndc(Vector2::new(0.0, 0.0), 800, 600);
        assert_eq!(top_left.x, -1.0);
        assert_eq!(top_left.y, 1.0);

        let bottom_right = to_ndc(Vector2::new(800.0, 600.0), 800, 600);
        assert_eq!(bottom_right.x, 1.0);
        assert_eq!(bottom_right.y, -1.0);
    }
}
