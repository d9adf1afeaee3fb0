use eframe::egui;
use egui::{RichText, Ui};

use crate::background::{Background, Waker};
use crate::ui;
use crate::weather::{icon_glyph, WeatherClient, WeatherReport, WEATHER_ERROR};

type Outcome = Result<WeatherReport, &'static str>;

/// Current conditions plus forecast, fetched once in the background.
pub struct WeatherWidget {
    /// `None` while the fetch is in flight.
    report: Option<Outcome>,
    pending: Background<Outcome>,
}

impl WeatherWidget {
    pub fn load(client: WeatherClient, waker: Waker) -> Self {
        WeatherWidget {
            report: None,
            pending: Background::spawn("weather", waker, Err(WEATHER_ERROR), move || {
                client.load()
            }),
        }
    }

    pub fn with_report(report: Outcome) -> Self {
        WeatherWidget {
            report: Some(report),
            pending: Background::idle(),
        }
    }

    pub fn poll(&mut self) {
        if let Some(report) = self.pending.poll() {
            self.report = Some(report);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    pub fn report(&self) -> Option<Result<&WeatherReport, &'static str>> {
        self.report.as_ref().map(|r| r.as_ref().map_err(|e| *e))
    }

    pub fn show(&self, ui: &mut Ui) {
        let report = match self.report() {
            None => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Loading weather…").weak());
                });
                return;
            }
            Some(Ok(report)) => report,
            Some(Err(message)) => {
                ui.label(RichText::new(message).color(ui::ERROR_RED));
                return;
            }
        };

        ui.label(RichText::new(&report.town).strong().size(18.0));
        ui.horizontal(|ui| {
            ui.label(RichText::new(icon_glyph(&report.icon)).size(28.0));
            ui.label(RichText::new(&report.temperature).size(28.0));
            ui.label(&report.description);
        });

        ui.add_space(6.0);
        ui.label(RichText::new("Next hours").strong());
        egui::Grid::new("hourly-forecast").striped(true).show(ui, |ui| {
            for hour in &report.hourly {
                ui.label(&hour.time);
                ui.label(&hour.temperature);
                ui.label(&hour.description);
                ui.end_row();
            }
        });

        ui.add_space(6.0);
        ui.label(RichText::new("Forecast").strong());
        ui.horizontal(|ui| {
            for day in &report.daily {
                ui.group(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&day.day).strong());
                        ui.label(RichText::new(icon_glyph(&day.icon)).size(20.0));
                        ui.label(&day.temperature);
                        ui.label(RichText::new(&day.description).small());
                    });
                });
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::noop_waker;
    use crate::config::WeatherConfig;
    use std::net::TcpListener;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn unreachable_provider_settles_on_fixed_message() {
        // bind then drop, so the port refuses connections
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let client = WeatherClient::new(
            WeatherConfig {
                api_base: format!("http://127.0.0.1:{port}"),
                ..WeatherConfig::default()
            },
            Duration::from_secs(2),
        );

        let mut widget = WeatherWidget::load(client, noop_waker());
        assert!(widget.report().is_none());

        let deadline = Instant::now() + Duration::from_secs(10);
        while widget.is_pending() && Instant::now() < deadline {
            widget.poll();
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(widget.report(), Some(Err(WEATHER_ERROR)));
    }
}
