/// Objwire terminal viewer
///
/// Loads the OBJ file named on the command line (or a built-in cube when
/// none is given) and spins up the interactive terminal viewer.
/// Controls:
///   - Arrow keys: pan
///   - x/y/z (shift for reverse): rotate
///   - +/-: zoom, p: toggle spin, 0: reset rotation
///   - q/ESC: quit

use std::process::ExitCode;

use objwire_core::Mesh;
use objwire_terminal::App;

fn main() -> ExitCode {
    env_logger::init();

    let (mesh, name) = match std::env::args().nth(1) {
        Some(path) => match Mesh::from_path(&path) {
            Ok(mesh) => (mesh, path),
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => (Mesh::cube(2.0), "cube (built-in)".to_string()),
    };
    log::info!(
        "{name}: {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.faces().len()
    );

    let result = App::new(mesh, name).and_then(|mut app| app.run());
    if let Err(err) = result {
        eprintln!("terminal error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
