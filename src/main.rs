use anyhow::Result;
use guardian::config::Config;
use guardian::logging::{log, obj, v_str, Domain, Level};
use guardian::pipeline;
use serde_json::json;

fn main() -> Result<()> {
    let cfg = Config::from_env();
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("seed", json!(cfg.seed)),
            ("output", v_str(&cfg.output_path.display().to_string())),
            ("dpi", json!(cfg.dpi)),
            ("show", json!(cfg.show)),
        ]),
    );

    let report = match pipeline::run(&cfg) {
        Ok(report) => report,
        Err(err) => {
            log(
                Level::Fatal,
                Domain::System,
                "run_failed",
                obj(&[("msg", v_str(&format!("{:#}", err)))]),
            );
            return Err(err);
        }
    };

    log(
        Level::Info,
        Domain::System,
        "shutdown",
        obj(&[
            ("rows", json!(report.timeline.len())),
            ("chart", v_str(&report.artifact.path)),
            ("sha256", v_str(&report.artifact.sha256)),
            ("displayed", json!(report.displayed)),
        ]),
    );
    Ok(())
}
