use stage_measure::{MeasurementSession, SvgOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up logging; verbosity comes from RUST_LOG
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: stage-measure <session.json>");
        std::process::exit(2);
    };

    let json = std::fs::read_to_string(&path)?;
    let session = MeasurementSession::from_json(&json)?;
    log::info!(
        "Loaded {} nodes and {} measurements from {} ({} px/m)",
        session.plan.nodes.len(),
        session.plan.measurements.len(),
        path,
        session.settings.px_per_meter.px_per_meter()
    );

    print!("{}", session.to_svg(&SvgOptions::default()));
    Ok(())
}
