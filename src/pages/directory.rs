use eframe::egui;
use egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use std::sync::Arc;

use crate::background::Waker;
use crate::catalog::{CatalogLoad, Facet, LoadState, ResourceSource, MEMBERS};
use crate::filter::Filter;
use crate::models::{Member, MembershipTier};
use crate::render::{render, Rendered};
use crate::ui;

pub const NO_MEMBERS: &str = "No members found.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DirectoryView {
    #[default]
    Grid,
    List,
}

pub struct DirectoryPage {
    catalog: CatalogLoad<Member>,
    pub filter: Filter,
    pub view: DirectoryView,
}

impl DirectoryPage {
    pub fn load(source: Arc<dyn ResourceSource>, waker: Waker) -> Self {
        Self::with_load(CatalogLoad::spawn(source, &MEMBERS, waker, |m: Member| m))
    }

    pub fn with_catalog(catalog: LoadState<Member>) -> Self {
        Self::with_load(catalog.into())
    }

    fn with_load(catalog: CatalogLoad<Member>) -> Self {
        DirectoryPage {
            catalog,
            filter: Filter::new().with_selector(Facet::Membership, ""),
            view: DirectoryView::default(),
        }
    }

    pub fn poll(&mut self) {
        self.catalog.poll();
    }

    pub fn is_pending(&self) -> bool {
        self.catalog.is_pending()
    }

    pub fn members(&self) -> Rendered<&Member> {
        render(
            self.catalog.state(),
            &self.filter.apply(self.catalog.items()),
            NO_MEMBERS,
            |m| m,
        )
    }

    pub fn show(&mut self, ui: &mut Ui) {
        ui.heading("Member Directory");
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            ui.label("Search:");
            ui.text_edit_singleline(&mut self.filter.query);
            let levels = MembershipTier::ALL.map(MembershipTier::label);
            ui::select(
                ui,
                "Membership",
                self.filter.selector_mut(Facet::Membership),
                &levels,
            );
            ui.separator();
            ui.selectable_value(&mut self.view, DirectoryView::Grid, "Grid");
            ui.selectable_value(&mut self.view, DirectoryView::List, "List");
        });
        ui.add_space(10.0);

        let rendered = self.members();
        match (&rendered, self.view) {
            (Rendered::Cards(members), DirectoryView::List) => Self::show_table(ui, members),
            _ => {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui::show_rendered(ui, &rendered, |ui, member| {
                        ui::card(ui, 280.0, |ui| {
                            ui.label(RichText::new(&member.name).strong().size(18.0));
                            ui::colored_tag(ui, member.membership.label(), tier_color(member.membership));
                            ui.label(&member.address);
                            ui.label(&member.phone);
                            ui.hyperlink(&member.website);
                            if !member.description.is_empty() {
                                ui.label(RichText::new(&member.description).weak());
                            }
                        });
                    });
                });
            }
        }
    }

    fn show_table(ui: &mut Ui, members: &[&Member]) {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(160.0))
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::remainder())
            .header(22.0, |mut header| {
                for title in ["Name", "Membership", "Address", "Phone", "Website"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for member in members {
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&member.name);
                        });
                        row.col(|ui| {
                            ui.label(member.membership.label());
                        });
                        row.col(|ui| {
                            ui.label(&member.address);
                        });
                        row.col(|ui| {
                            ui.label(&member.phone);
                        });
                        row.col(|ui| {
                            ui.hyperlink(&member.website);
                        });
                    });
                }
            });
    }
}

pub fn tier_color(tier: MembershipTier) -> egui::Color32 {
    match tier {
        MembershipTier::Gold => egui::Color32::from_rgb(0xff, 0xd7, 0x00),
        MembershipTier::Silver => egui::Color32::from_rgb(0xc0, 0xc0, 0xc0),
        MembershipTier::Member => ui::ACCENT_GREEN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, tier: u8) -> Member {
        Member {
            name: name.into(),
            address: "1 Main St".into(),
            phone: "555-0100".into(),
            website: "https://example.com".into(),
            image: String::new(),
            membership: MembershipTier::from(tier),
            description: String::new(),
        }
    }

    fn page() -> DirectoryPage {
        DirectoryPage::with_catalog(LoadState::Ready(vec![
            member("Andes Coffee", 1),
            member("Lima Print Co", 3),
            member("Pacific Tours", 2),
        ]))
    }

    fn names(rendered: Rendered<&Member>) -> Vec<String> {
        rendered.cards().iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn membership_filter_is_exact() {
        let mut page = page();
        assert_eq!(names(page.members()).len(), 3);

        page.filter.set_selector(Facet::Membership, "Gold");
        assert_eq!(names(page.members()), ["Lima Print Co"]);

        page.filter.query = "coffee".into();
        assert_eq!(page.members().message(), Some(NO_MEMBERS));
    }

    #[test]
    fn failed_load_shows_member_error() {
        let page = DirectoryPage::with_catalog(LoadState::Failed(MEMBERS.error_message));
        assert_eq!(page.members().message(), Some("Unable to load member data."));
        assert_eq!(page.view, DirectoryView::Grid);
    }
}
