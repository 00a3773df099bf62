//! The single product page: add/edit form on the left, product list on the right.

use std::time::Duration;

use client_core::{
    pricing::{self, Currency},
    EditingTarget, EditorEvent, NoticeSeverity, ProductListEditor, SyncPolicy,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{Product, ProductId};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::apply_editor_event};

pub const APP_TITLE: &str = "Product Catalog Editor";

/// Display strings for one list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl ProductRow {
    pub fn from_product(product: &Product, currency: &Currency) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description_or_empty().to_string(),
            price: pricing::format_price(product.price, currency),
        }
    }
}

enum RowAction {
    Edit(Product),
    Delete(ProductId),
}

pub struct ProductEditorApp {
    editor: ProductListEditor,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    currency: &'static Currency,
    api_url: String,
    status: String,
}

impl ProductEditorApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        sync_policy: SyncPolicy,
        currency: &'static Currency,
        api_url: String,
    ) -> Self {
        let mut app = Self {
            editor: ProductListEditor::new(sync_policy),
            cmd_tx,
            ui_rx,
            currency,
            api_url,
            status: String::new(),
        };
        app.apply(EditorEvent::Mounted);
        app
    }

    fn apply(&mut self, event: EditorEvent) {
        apply_editor_event(&mut self.editor, &self.cmd_tx, event, &mut self.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::Completed(completion) => self.apply(EditorEvent::Completed(completion)),
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), "{}", err.message());
                    self.status = err.status_line();
                }
            }
        }
    }

    fn show_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(format!("API: {}", self.api_url));
            ui.separator();
            ui.label(format!("Sync: {}", self.editor.policy()));
            ui.separator();
            if self.editor.in_flight() > 0 {
                ui.spinner();
                ui.label(format!("Syncing ({})", self.editor.in_flight()));
                ui.separator();
            }
            ui.label(self.status.as_str());
        });
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let target = self.editor.target();
        match target {
            EditingTarget::None => ui.heading("Add product"),
            EditingTarget::Product(id) => ui.heading(format!("Edit product #{}", id.0)),
        };
        ui.add_space(6.0);

        let mut dismiss_notice = false;
        if let Some(notice) = self.editor.notice() {
            let color = match notice.severity {
                NoticeSeverity::Warning => egui::Color32::from_rgb(0xd9, 0x8e, 0x04),
                NoticeSeverity::Error => egui::Color32::from_rgb(0xd0, 0x3a, 0x3a),
            };
            ui.horizontal_wrapped(|ui| {
                ui.colored_label(color, notice.message.as_str());
                dismiss_notice = ui.small_button("Dismiss").clicked();
            });
            ui.add_space(6.0);
        }

        let form = self.editor.form_mut();
        egui::Grid::new("product_form")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Name *");
                ui.text_edit_singleline(&mut form.name);
                ui.end_row();

                ui.label("Description");
                ui.add(egui::TextEdit::multiline(&mut form.description).desired_rows(3));
                ui.end_row();

                ui.label("Price");
                ui.add(egui::TextEdit::singleline(&mut form.price).hint_text("0.00"));
                ui.end_row();
            });
        ui.add_space(8.0);

        let mut submit = false;
        let mut cancel = false;
        ui.horizontal(|ui| {
            let label = match target {
                EditingTarget::None => "Create",
                EditingTarget::Product(_) => "Update",
            };
            submit = ui.button(label).clicked();
            if target != EditingTarget::None {
                cancel = ui.button("Cancel").clicked();
            }
        });

        if dismiss_notice {
            self.apply(EditorEvent::DismissNotice);
        }
        if submit {
            self.apply(EditorEvent::Submit);
        } else if cancel {
            self.apply(EditorEvent::CancelEdit);
        }
    }

    fn show_product_list(&mut self, ui: &mut egui::Ui) {
        let mut refresh = false;
        ui.horizontal(|ui| {
            ui.heading("Products");
            refresh = ui.button("Refresh").clicked();
        });
        ui.separator();

        let mut action = None;
        if self.editor.products().is_empty() {
            ui.label("No products yet.");
        } else {
            let editing = self.editor.target().product_id();
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("product_list")
                    .num_columns(4)
                    .striped(true)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        ui.strong("Name");
                        ui.strong("Description");
                        ui.strong("Price");
                        ui.label("");
                        ui.end_row();

                        for product in self.editor.products() {
                            let row = ProductRow::from_product(product, self.currency);
                            if editing == Some(product.id) {
                                ui.strong(row.name);
                            } else {
                                ui.label(row.name);
                            }
                            ui.label(row.description);
                            ui.label(row.price);
                            ui.horizontal(|ui| {
                                if ui.button("Edit").clicked() {
                                    action = Some(RowAction::Edit(product.clone()));
                                }
                                if ui.button("Delete").clicked() {
                                    action = Some(RowAction::Delete(product.id));
                                }
                            });
                            ui.end_row();
                        }
                    });
            });
        }

        if refresh {
            self.apply(EditorEvent::Refresh);
        }
        match action {
            Some(RowAction::Edit(product)) => self.apply(EditorEvent::StartEdit(product)),
            Some(RowAction::Delete(id)) => self.apply(EditorEvent::Delete(id)),
            None => {}
        }
    }
}

impl eframe::App for ProductEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| self.show_status_bar(ui));
        egui::SidePanel::left("product_form_panel")
            .resizable(false)
            .exact_width(320.0)
            .show(ctx, |ui| self.show_form(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.show_product_list(ui));

        // Completions arrive on a channel, so keep polling while requests are out.
        let poll = if self.editor.in_flight() > 0 {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(250)
        };
        ctx.request_repaint_after(poll);
    }
}
