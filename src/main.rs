use aws_subnet_planner::output::{plan_print, write_plan};
use aws_subnet_planner::{plan_from_files, AppConfig};
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    log4rs::init_file("log4rs.yml", Default::default())?;
    log::info!("#Start main()");

    let app = AppConfig::from_env()?;
    let plan = plan_from_files(&app).map_err(|e| {
        log::error!("Planning failed: {e}");
        e
    })?;

    // stdout carries the JSON plan unless it goes to a file
    if app.plan_output.is_some() {
        plan_print(&plan);
    }
    write_plan(&plan, app.plan_output.as_deref().map(Path::new))?;

    Ok(())
}
