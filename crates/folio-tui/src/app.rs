use std::sync::Arc;
use std::time::{Duration, Instant};

use folio_core::gesture::GestureAction;
use folio_core::scroll::timing::{lerp, progress};
use folio_core::slideshow::Slideshow;
use folio_core::typewriter::Typewriter;
use folio_core::visibility::{intersection_ratio, VisibilityTracker};
use folio_core::{AppConfig, GestureOutcome, NavigationSession, SectionRegistry, SessionStore};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::input::Action;
use crate::layout::{content_heights, measure_all, ElementId, SectionLayout};
use crate::theme::{load_theme, Theme};

/// Time the progress fill takes to catch up with its target
const FILL_TRANSITION: Duration = Duration::from_millis(150);

/// Screen regions, recomputed on resize
#[derive(Debug, Clone, Copy, Default)]
pub struct Areas {
    pub nav: Rect,
    pub progress: Rect,
    pub page: Rect,
    pub status: Rect,
}

/// Which kind of gesture produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Wheel,
    Touch,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub session: NavigationSession,
    pub typewriter: Typewriter,
    pub slideshow: Slideshow,
    pub visibility: VisibilityTracker<ElementId>,
    pub layouts: Vec<SectionLayout>,
    pub areas: Areas,
    /// Progress fill as drawn, trailing the indicator's target while transitions are on
    pub progress_fill: f64,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Reference instant for the idle cursor blink
    pub started_at: Instant,
    fill_from: f64,
    fill_target: u8,
    fill_since: Option<Instant>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, store: Box<dyn SessionStore>) -> Self {
        let registry = SectionRegistry::from_config(&config.sections);
        let session = NavigationSession::new(registry, &config, store);
        let slideshow = Slideshow::new(
            config.slideshow.slides.len(),
            Duration::from_millis(config.slideshow.interval_ms),
        );

        Self {
            theme: load_theme(&config.ui.theme),
            session,
            typewriter: Typewriter::new(&config.typing),
            slideshow,
            visibility: VisibilityTracker::new(config.visibility.threshold),
            layouts: Vec::new(),
            areas: Areas::default(),
            progress_fill: 0.0,
            should_quit: false,
            started_at: Instant::now(),
            fill_from: 0.0,
            fill_target: 0,
            fill_since: None,
            config,
        }
    }

    /// Restore the last viewed section and start the peripheral animations
    pub fn start(&mut self, now: Instant) {
        if let Some(index) = self.session.restore() {
            tracing::info!("Resuming at section {}", index);
        }
        self.started_at = now;
        self.typewriter.start(now);
        self.slideshow.start(now);
        self.update_visibility();
    }

    /// Height of one section page in rows
    pub fn page_height(&self) -> u16 {
        self.areas.page.height
    }

    /// Recompute screen areas and section geometry for a new terminal size
    pub fn resize(&mut self, width: u16, height: u16) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(Rect::new(0, 0, width, height));

        self.areas = Areas {
            nav: chunks[0],
            progress: chunks[1],
            page: chunks[2],
            status: chunks[3],
        };

        let page = self.page_height();
        self.layouts = measure_all(&self.config.sections, page);
        self.session
            .relayout(page as f64, &content_heights(&self.layouts));
        self.update_visibility();
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Wheel(delta) => {
                let outcome = self.session.wheel(delta, now);
                self.apply_internal_scroll(outcome, Source::Wheel);
            }
            Action::TouchStart(y) => {
                self.session.touch_start(y);
            }
            Action::TouchMove(y) => {
                let outcome = self.session.touch_move(y, now);
                self.apply_internal_scroll(outcome, Source::Touch);
            }
            Action::TouchEnd => {
                self.session.touch_end(now);
            }
            Action::GoTo(id) => {
                self.session.go_to_id(&id, now);
            }
            Action::None => {}
        }
        self.step_progress_fill(now);
        self.update_visibility();
    }

    /// A terminal has no native scrolling, so the host scrolls the section itself
    fn apply_internal_scroll(&mut self, outcome: GestureOutcome, source: Source) {
        if outcome.default_prevented {
            return;
        }
        if let GestureAction::Internal { delta } = outcome.action {
            let rows = match source {
                Source::Wheel => delta.signum() * self.config.input.lines_per_notch as f64,
                Source::Touch => delta / self.config.input.touch_row_units,
            };
            self.session.scroll_active_section(rows);
        }
    }

    /// Advance timers and animations. Returns whether a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.session.tick(now).is_some();
        changed |= self.typewriter.tick(now);
        changed |= self.slideshow.tick(now);
        changed |= self.step_progress_fill(now);

        if changed {
            self.update_visibility();
        }
        changed
    }

    fn step_progress_fill(&mut self, now: Instant) -> bool {
        let view = self.session.progress();
        let before = self.progress_fill;

        if !view.transitions_enabled {
            self.progress_fill = view.fill as f64;
            self.fill_target = view.fill;
            self.fill_since = None;
            return self.progress_fill != before;
        }

        if view.fill != self.fill_target {
            self.fill_from = self.progress_fill;
            self.fill_target = view.fill;
            self.fill_since = Some(now);
        }
        if let Some(since) = self.fill_since {
            let t = progress(since, now, FILL_TRANSITION);
            self.progress_fill = lerp(self.fill_from, self.fill_target as f64, t);
            if t >= 1.0 {
                self.fill_since = None;
            }
        }

        self.progress_fill != before
    }

    /// Whether the next frame should come at animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.session.is_animating() || self.fill_since.is_some()
    }

    /// How long the main loop may sleep before the next tick
    pub fn next_wakeup(&self, now: Instant) -> Duration {
        let fps = self.config.ui.animation_fps.max(1) as u64;
        let frame = Duration::from_millis(1000 / fps);
        if self.needs_fast_update() {
            return frame;
        }

        let idle = Duration::from_millis(self.config.ui.tick_rate_ms);
        [
            self.session.next_deadline(),
            self.typewriter.next_deadline(),
            self.slideshow.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .map(|at| at.saturating_duration_since(now))
        .fold(idle, Duration::min)
    }

    /// First document row in view
    pub fn viewport_row(&self) -> f64 {
        self.session.viewport_offset().round()
    }

    /// Internal scroll of a section in whole rows
    pub fn section_scroll(&self, index: usize) -> u16 {
        self.session
            .registry()
            .get(index)
            .map(|s| s.metrics().scroll_top.round().max(0.0) as u16)
            .unwrap_or(0)
    }

    /// Feed every observed element's on-screen share to the visibility tracker
    pub fn update_visibility(&mut self) {
        let page = self.page_height() as f64;
        if page <= 0.0 {
            return;
        }
        let viewport_top = self.viewport_row();

        for (i, layout) in self.layouts.iter().enumerate() {
            let section_top = i as f64 * page;
            let scroll = self
                .session
                .registry()
                .get(i)
                .map(|s| s.metrics().scroll_top.round())
                .unwrap_or(0.0);

            for element in &layout.elements {
                // clip to the section's own page before measuring
                let top = element.top as f64 - scroll;
                let visible_top = top.max(0.0);
                let visible_bottom = (top + element.height as f64).min(page);
                let on_page = (visible_bottom - visible_top).max(0.0);
                let ratio = if on_page <= 0.0 {
                    0.0
                } else {
                    let page_share = intersection_ratio(
                        section_top + visible_top,
                        on_page,
                        viewport_top,
                        page,
                    );
                    page_share * on_page / element.height as f64
                };

                if let Some(shown) = self.visibility.observe(element.id, ratio) {
                    tracing::trace!("{:?} visible: {}", element.id, shown);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::MemoryStore;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn app() -> App {
        let mut app = App::new(Arc::new(AppConfig::default()), Box::new(MemoryStore::new()));
        // 20 page rows
        app.resize(80, 23);
        app
    }

    #[test]
    fn test_resize_lays_out_pages() {
        let app = app();
        assert_eq!(app.page_height(), 20);
        assert_eq!(app.areas.status.y, 22);
        let experience = app.session.registry().get(2).unwrap();
        assert_eq!(experience.page_offset(), 40.0);
        assert_eq!(experience.metrics().scroll_height, 25.0);
    }

    #[test]
    fn test_wheel_notches_change_section() {
        let t0 = Instant::now();
        let mut app = app();
        app.start(t0);
        for i in 0..3 {
            app.handle_action(Action::Wheel(50.0), t0 + ms(i * 30));
        }
        assert_eq!(app.session.current(), 1);

        app.tick(t0 + ms(100));
        assert!(app.needs_fast_update());
        app.tick(t0 + ms(1300));
        assert_eq!(app.viewport_row(), 20.0);
    }

    #[test]
    fn test_wheel_scrolls_tall_section_internally() {
        let t0 = Instant::now();
        let mut app = app();
        app.handle_action(Action::GoTo("experience".to_string()), t0);
        app.tick(t0 + ms(1000));

        app.handle_action(Action::Wheel(50.0), t0 + ms(1100));
        assert_eq!(app.section_scroll(2), 3);
        assert_eq!(app.session.current(), 2);
    }

    #[test]
    fn test_touch_drag_scrolls_internally() {
        let t0 = Instant::now();
        let mut app = app();
        app.handle_action(Action::GoTo("experience".to_string()), t0);
        app.tick(t0 + ms(1000));

        app.handle_action(Action::TouchStart(200.0), t0 + ms(1100));
        app.handle_action(Action::TouchMove(140.0), t0 + ms(1110));
        assert_eq!(app.section_scroll(2), 3);
    }

    #[test]
    fn test_elements_fade_in_on_their_page() {
        let t0 = Instant::now();
        let mut app = app();
        let header = ElementId { section: 1, index: 0 };
        assert!(!app.visibility.is_visible(&header));

        app.handle_action(Action::GoTo("education".to_string()), t0);
        app.tick(t0 + ms(1000));
        assert!(app.visibility.is_visible(&header));
    }

    #[test]
    fn test_next_wakeup_idle_and_animating() {
        let t0 = Instant::now();
        let mut app = app();
        app.tick(t0);
        assert_eq!(app.next_wakeup(t0), ms(250));

        app.handle_action(Action::GoTo("contact".to_string()), t0);
        assert_eq!(app.next_wakeup(t0), ms(16));
    }

    #[test]
    fn test_progress_fill_eases_toward_target() {
        let t0 = Instant::now();
        let mut app = app();
        app.tick(t0);
        app.handle_action(Action::Wheel(75.0), t0);
        app.tick(t0 + ms(75));
        assert!(app.progress_fill > 0.0 && app.progress_fill < 50.0);
        app.tick(t0 + ms(150));
        assert_eq!(app.progress_fill, 50.0);
    }
}
