use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};

use folio_core::{AppConfig, FileStore};
use folio_tui::{
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    widgets::{NavBarWidget, ProgressBarWidget, SectionViewWidget, StatusBarWidget},
    App,
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let store = FileStore::default();
    tracing::debug!("Session store at {}", store.path().display());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Folio"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = main_loop(&mut terminal, config, store).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Arc<AppConfig>,
    store: FileStore,
) -> Result<()> {
    let mut app = App::new(config, Box::new(store));

    let size = terminal.size()?;
    app.resize(size.width, size.height);
    app.start(Instant::now());

    let mut events = EventHandler::spawn();

    loop {
        let now = Instant::now();
        app.tick(now);

        terminal.draw(|frame| {
            NavBarWidget::render(frame, app.areas.nav, &app);
            ProgressBarWidget::render(frame, app.areas.progress, &app);
            SectionViewWidget::render(frame, app.areas.page, &app, now);
            StatusBarWidget::render(frame, app.areas.status, &app);
        })?;

        let wait = app.next_wakeup(Instant::now());

        tokio::select! {
            event = events.next() => {
                let Some(event) = event else {
                    tracing::warn!("Terminal event reader stopped");
                    break;
                };
                let now = Instant::now();
                match event {
                    AppEvent::Key(key) => {
                        let action = handle_key_event(key, &app);
                        app.handle_action(action, now);
                    }
                    AppEvent::Mouse(mouse) => {
                        let action = handle_mouse_event(mouse, &app);
                        app.handle_action(action, now);
                    }
                    AppEvent::Resize(width, height) => {
                        app.resize(width, height);
                    }
                }
            }
            _ = tokio::time::sleep(wait) => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
