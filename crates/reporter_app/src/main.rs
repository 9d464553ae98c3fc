mod board;
mod logging;
mod session;

use std::io::{self, Write};

use reporter_engine::{HttpJobRunner, RunnerSettings};
use reporter_logging::runner_info;

/// Flask development-server address the original page was served from.
const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const CONFIRM_PROMPT: &str = "WARNING: The library reporter will make the library website run \
slower than usual. Are you sure you want to run the reports?";

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::File);

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    if !confirm(CONFIRM_PROMPT)? {
        runner_info!("run declined; nothing was started");
        return Ok(());
    }

    let settings = RunnerSettings::new(&base_url)?;
    let runner = HttpJobRunner::new(settings)?;
    let mut board = board::TerminalBoard::new();
    let options = session::SessionOptions::default();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session::run(&runner, &mut board, &base_url, &options));

    Ok(())
}

/// Blocking yes/no prompt. Anything other than "y"/"yes" declines.
fn confirm(prompt: &str) -> io::Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt} [y/N] ")?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
