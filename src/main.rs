use loft_viewer::app;

fn print_bindings() {
    println!("controls:");
    println!("  W/A/S/D       move camera, right-drag to look, scroll to zoom");
    println!("  6 (hold)      show the six solids, R to pulse their scale");
    println!("  O             export the solids to six_basic.obj");
    println!("  T             cycle the paintings texture");
    println!("  M             toggle shadows");
    println!("  P             save a screenshot");
    println!("  N             toggle the curve overlay");
    println!("    right-click   add / pick / place a control point");
    println!("    Up/Down       raise / lower the curve order");
    println!("    [ / ]         adjust the weight of the point under the cursor");
    println!("    G             toggle construction geometry");
    println!("  Esc           quit");
}

fn main() {
    print_bindings();
    if let Err(error) = app::run_from_env() {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}
