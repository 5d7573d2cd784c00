use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use clap::Parser;

use term_desk::desktop::Desktop;
use term_desk::drivers::{ConsoleInputDriver, ConsoleOutputDriver, InputDriver};
use term_desk::event_loop::{ControlFlow, EventLoop};
use term_desk::persist::{self, ConfigStore};
use term_desk::tracing_sub;

#[derive(Debug, Parser)]
#[command(name = "term-desk", version, about = "A portfolio desktop environment for terminal shells")]
struct Cli {
    /// Directory for the state file and log (defaults to the platform
    /// config dir).
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Target frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Skip the lock screen.
    #[arg(long)]
    unlocked: bool,

    /// Do not capture the mouse (keyboard-only session).
    #[arg(long)]
    no_mouse: bool,

    /// Log at debug level.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let state_path = match &cli.state_dir {
        Some(dir) => dir.join("state.json"),
        None => persist::default_state_path(),
    };
    let log_path = state_path.with_file_name("term-desk.log");
    tracing_sub::init(&log_path, cli.verbose);
    tracing::info!(state = %state_path.display(), "starting");

    let store = Rc::new(RefCell::new(ConfigStore::load_or_default(state_path)));
    let mut desktop = Desktop::new(store, !cli.unlocked);

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let mut input = ConsoleInputDriver::new();
    input.set_mouse_capture(!cli.no_mouse)?;

    let poll_interval = Duration::from_millis(1000 / cli.fps.max(1) as u64);
    let mut event_loop = EventLoop::new(input, poll_interval);

    let result = event_loop.run(|_, event| {
        let now = Instant::now();
        match event {
            Some(event) => desktop.handle_event(&event, now),
            None => {
                desktop.tick(now);
                output.draw(|ui| desktop.render(ui, now))?;
            }
        }
        if desktop.quit_requested() {
            Ok(ControlFlow::Quit)
        } else {
            Ok(ControlFlow::Continue)
        }
    });

    output.exit()?;
    result
}
