use std::io::Write;

use clap::Parser;
use fontglyphs::CancellationFlag;
use glyphs2code::{run, Args, Error};
use log::warn;

fn main() -> Result<(), Error> {
    env_logger::builder()
        .format(|buf, record| {
            let ts = buf.timestamp_micros();
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "{}: {:?}: {style}{}{style:#}: {}",
                ts,
                std::thread::current().id(),
                record.level(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();
    let config = args.config()?;
    let report = run(
        &args.inputs,
        &config,
        args.face_index,
        &args.output(),
        &CancellationFlag::new(),
    )?;

    let warnings = report.diagnostics.len() - report.error_count();
    if warnings > 0 {
        warn!("{warnings} file(s) skipped");
    }
    match report.error_count() {
        0 => Ok(()),
        errors => Err(Error::FilesFailed(errors)),
    }
}
