use std::rc::Rc;
use std::time::Duration;

use chrono::{Datelike, Local, Utc};
use eframe::{egui, App, Frame};
use egui::{Align, Layout, RichText};
use tracing::{debug, info};

use crate::background::Waker;
use crate::config::AppConfig;
use crate::pages::{
    ContactPage, CoursesPage, DirectoryPage, DiscoverPage, HomePage, JoinPage,
    RoutineBuilderPage, RoutinesPage, WeatherWidget, WorkoutsPage,
};
use crate::session::Session;
use crate::storage::KeyValueStore;
use crate::ui;
use crate::weather::WeatherClient;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum DisplayMode {
    Home,
    Workouts,
    Routines,
    Builder,
    Contact,
    Directory,
    Discover,
    Join,
    Courses,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 9] = [
        DisplayMode::Home,
        DisplayMode::Workouts,
        DisplayMode::Routines,
        DisplayMode::Builder,
        DisplayMode::Contact,
        DisplayMode::Directory,
        DisplayMode::Discover,
        DisplayMode::Join,
        DisplayMode::Courses,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Home => "Home",
            DisplayMode::Workouts => "Workouts",
            DisplayMode::Routines => "Routines",
            DisplayMode::Builder => "Builder",
            DisplayMode::Contact => "Contact",
            DisplayMode::Directory => "Directory",
            DisplayMode::Discover => "Discover",
            DisplayMode::Join => "Join",
            DisplayMode::Courses => "Courses",
        }
    }

    fn shortcut(self) -> egui::Key {
        use egui::Key::*;
        match self {
            DisplayMode::Home => Num1,
            DisplayMode::Workouts => Num2,
            DisplayMode::Routines => Num3,
            DisplayMode::Builder => Num4,
            DisplayMode::Contact => Num5,
            DisplayMode::Directory => Num6,
            DisplayMode::Discover => Num7,
            DisplayMode::Join => Num8,
            DisplayMode::Courses => Num9,
        }
    }
}

pub struct FitTrackApp {
    session: Session,
    display_mode: DisplayMode,
    home: HomePage,
    workouts: WorkoutsPage,
    routines: RoutinesPage,
    builder: RoutineBuilderPage,
    contact: ContactPage,
    directory: DirectoryPage,
    discover: DiscoverPage,
    join: JoinPage,
    courses: CoursesPage,
}

impl FitTrackApp {
    /// Starts every catalog and weather fetch on its own worker thread and
    /// returns without waiting for them. `waker` runs as each one finishes.
    /// Failures only degrade the affected tab.
    pub fn new(config: &AppConfig, store: Rc<dyn KeyValueStore>, waker: Waker) -> Self {
        let source = config.resource_source();
        let weather = WeatherClient::new(config.weather.clone(), config.request_timeout());
        let day = Local::now().date_naive().num_days_from_ce().max(0) as u64;

        let app = FitTrackApp {
            session: Session::load(store),
            display_mode: DisplayMode::Home,
            home: HomePage::load(
                source.clone(),
                waker.clone(),
                WeatherWidget::load(weather, waker.clone()),
                day,
            ),
            workouts: WorkoutsPage::load(source.clone(), waker.clone()),
            routines: RoutinesPage::load(source.clone(), waker.clone()),
            builder: RoutineBuilderPage::load(source.clone(), waker.clone()),
            contact: ContactPage::default(),
            directory: DirectoryPage::load(source, waker),
            discover: DiscoverPage::default(),
            join: JoinPage::new(Utc::now()),
            courses: CoursesPage::default(),
        };
        info!(
            favorites = app.session.favorites.len(),
            routine = app.session.routine.len(),
            "session restored"
        );
        app
    }

    /// Moves finished background loads into their pages.
    pub fn poll_loads(&mut self) {
        let before = self.pending_loads();
        self.home.poll();
        self.workouts.poll();
        self.routines.poll();
        self.builder.poll();
        self.directory.poll();
        let after = self.pending_loads();
        if after < before {
            debug!(pending = after, "background loads settled");
        }
    }

    /// Fetches still in flight across all tabs.
    pub fn pending_loads(&self) -> usize {
        self.home.pending()
            + [
                self.workouts.is_pending(),
                self.routines.is_pending(),
                self.builder.is_pending(),
                self.directory.is_pending(),
            ]
            .into_iter()
            .filter(|&p| p)
            .count()
    }

    fn switch_to(&mut self, mode: DisplayMode) {
        if mode != self.display_mode {
            self.display_mode = mode;
            if mode == DisplayMode::Join {
                // the join timestamp marks when the form was opened
                self.join.form.timestamp = Utc::now();
            }
        }
    }
}

impl App for FitTrackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_loads();

        let focused = ctx.wants_keyboard_input();
        for mode in DisplayMode::ALL {
            if !focused && ctx.input(|i| i.key_pressed(mode.shortcut())) {
                self.switch_to(mode);
            }
        }

        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(16.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(28.0, egui::FontFamily::Proportional),
        );
        ctx.set_style(style);

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                for mode in DisplayMode::ALL {
                    if ui
                        .selectable_label(self.display_mode == mode, mode.label())
                        .clicked()
                    {
                        self.switch_to(mode);
                    }
                }
                let pending = self.pending_loads();
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(
                        RichText::new(Local::now().format("%H:%M:%S").to_string())
                            .color(ui::ACCENT_GREEN),
                    );
                    if pending > 0 {
                        ui.label(RichText::new(format!("Loading ({pending})")).weak());
                        ui.spinner();
                    }
                });
            });
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.display_mode {
            DisplayMode::Home => {
                if let Some(message) = self.home.show(ui) {
                    self.session.alert(message);
                }
            }
            DisplayMode::Workouts => self.workouts.show(ui, &mut self.session),
            DisplayMode::Routines => self.routines.show(ui, &mut self.session),
            DisplayMode::Builder => self.builder.show(ui, &mut self.session),
            DisplayMode::Contact => self.contact.show(ui, &mut self.session),
            DisplayMode::Directory => self.directory.show(ui),
            DisplayMode::Discover => self.discover.show(ui, &mut self.session),
            DisplayMode::Join => self.join.show(ui, &mut self.session),
            DisplayMode::Courses => self.courses.show(ui),
        });

        ui::show_notices(ctx, &mut self.session);
        ctx.request_repaint_after(Duration::from_secs(1));
    }
}
