use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::LevelFilter;
use modeler_shell::{ui, App};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{env, io, time::Duration};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger with debug fallback for development
    let mut logger = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        logger.filter_level(LevelFilter::Info);
        logger.filter_module("modeler_shell", LevelFilter::Debug);
    }
    logger.init();

    // Read the diagram before touching the terminal so errors stay readable
    let initial_xml = match env::args().nth(1) {
        Some(path) => match tokio::fs::read_to_string(&path).await {
            Ok(xml) => {
                log::info!("Loaded diagram from {}", path);
                xml
            }
            Err(e) => {
                eprintln!("Failed to read diagram '{}': {}", path, e);
                return Err(e.into());
            }
        },
        None => {
            log::info!("No diagram specified, starting with the demo diagram");
            diagram::DEMO_BPMN.to_string()
        }
    };

    let mut app = match App::new(initial_xml).await {
        Ok(app) => {
            log::info!("Application initialized successfully");
            app
        }
        Err(e) => {
            eprintln!("Failed to initialize the application: {}", e);
            return Err(e);
        }
    };

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    // Setup terminal
    if let Err(e) = enable_raw_mode() {
        eprintln!("Failed to initialize the terminal: {}", e);
        return Err(e.into());
    }
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        eprintln!("Failed to configure the terminal: {}", e);
        return Err(e.into());
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    if let Err(e) = app.mount().await {
        // Keep running unmounted; saving reports the missing editor.
        log::error!("Failed to mount editor: {}", e);
        app.ui_state
            .status_manager
            .set_error(format!("Failed to mount editor: {}", e));
    }

    let res = run_app(&mut terminal, &mut app).await;

    app.shutdown().await;
    restore_terminal()?;

    if let Err(err) = res {
        eprintln!("Error while running the application: {}", err);
        if let Some(source) = err.source() {
            eprintln!("Caused by: {}", source);
        }
        log::error!("Application error: {}", err);
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        if let Err(e) = app.sync_options().await {
            log::warn!("Failed to reconfigure editor: {}", e);
            app.ui_state.status_manager.surface(&e);
        }

        if let Err(e) = terminal.draw(|f| ui::draw(f, app)) {
            log::error!("Terminal draw error: {}", e);
            // Continue running despite draw errors
        }

        app.pump_events();
        app.poll_save_results();
        app.update_status();

        if app.should_quit() {
            log::info!("Application shutdown requested");
            break;
        }

        // Editor asked for a redraw; skip waiting for input this round.
        if app.ui_state.take_redraw_request() {
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if let Err(e) = app.handle_key_event(key).await {
                        log::error!("Key event handling error: {}", e);
                        app.ui_state
                            .status_manager
                            .set_error(format!("Key handling error: {}", e));
                    }
                }
                Event::Resize(_, _) => {
                    log::debug!("Terminal resized");
                }
                _ => {}
            }
        }
    }

    log::info!("Application loop ended successfully");
    Ok(())
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
    let _ = execute!(stdout, crossterm::cursor::Show);
    Ok(())
}
