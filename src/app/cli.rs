use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_path: PathBuf,
    /// Root for the paintings textures, screenshots and OBJ exports.
    pub asset_dir: PathBuf,
}

pub fn parse_from_env() -> Result<AppConfig, String> {
    let args = std::env::args().collect::<Vec<String>>();
    if args.len() != 3 {
        return Err(format!(
            "Usage: {} <path_to_model> <asset_dir>\nExample: cargo run -- media/obj/Bedroom.obj media",
            args.first().map(|s| s.as_str()).unwrap_or("loft_viewer")
        ));
    }

    let config = AppConfig {
        model_path: PathBuf::from(&args[1]),
        asset_dir: PathBuf::from(&args[2]),
    };

    validate_model_path(&config.model_path)?;
    validate_asset_dir(&config.asset_dir)?;
    Ok(config)
}

fn validate_model_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("model file does not exist: {}", path.display()));
    }
    if !path.is_file() {
        return Err(format!("model path is not a file: {}", path.display()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| format!("model file has no extension: {}", path.display()))?;
    if !extension.eq_ignore_ascii_case("obj") {
        return Err(format!(
            "model file must have .obj extension: {}",
            path.display()
        ));
    }

    File::open(path)
        .map(|_| ())
        .map_err(|error| format!("Failed to open model file '{}': {}", path.display(), error))
}

fn validate_asset_dir(path: &Path) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("asset path is not a directory: {}", path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn model_path_must_exist_and_be_an_obj() {
        assert!(validate_model_path(Path::new("/no/such/model.obj")).is_err());

        let dir = std::env::temp_dir().join(format!("loft_viewer_cli_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("failed to create fixture dir");

        let wrong_ext = dir.join("model.txt");
        fs::write(&wrong_ext, "v 0 0 0\n").expect("failed to write fixture");
        assert!(validate_model_path(&wrong_ext).is_err());

        let obj = dir.join("model.obj");
        fs::write(&obj, "v 0 0 0\n").expect("failed to write fixture");
        assert!(validate_model_path(&obj).is_ok());

        assert!(validate_asset_dir(&dir).is_ok());
        assert!(validate_asset_dir(&obj).is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}
