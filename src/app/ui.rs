use super::ActionProgress;
use super::DocumentUploader;
use crate::upload::{ToastKind, MAX_FILE_SIZE};
use crate::utils::file_size::format_size;
use egui::{Align, Align2, Color32, RichText};

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const SUCCESS: Color32 = Color32::from_rgb(0, 180, 0);
const FAILURE: Color32 = Color32::from_rgb(220, 50, 50);
const MUTED: Color32 = Color32::from_rgb(150, 150, 150);

impl DocumentUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let footer_height = 40.0;
            let content_height = ui.available_height() - footer_height;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Document Uploader");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Upload documents to your ingestion server")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);
                    self.render_server_settings(ui);
                    ui.add_space(20.0);
                    self.render_documents(ui);
                    ui.add_space(20.0);

                    ui.vertical_centered(|ui| {
                        let button = egui::Button::new("📤 Upload Documents")
                            .min_size(egui::vec2(200.0, 40.0));
                        if ui.add(button).clicked() {
                            self.open_dialog();
                        }
                    });
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(10.0);
                self.render_footer(ui);
            });
        });

        if self.state.session.is_open() {
            self.render_dialog(ctx);
        }
        self.render_toasts(ctx);
    }

    fn render_server_settings(&mut self, ui: &mut egui::Ui) {
        let editable = !self.state.session.is_uploading();
        ui.group(|ui| {
            ui.add_enabled_ui(editable, |ui| {
                egui::Grid::new("server_settings")
                    .num_columns(2)
                    .spacing([8.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Server URL");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.server_url)
                                .desired_width(f32::INFINITY)
                                .hint_text("http://localhost:9621"),
                        );
                        ui.end_row();

                        ui.label("API key");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.api_key)
                                .password(true)
                                .desired_width(f32::INFINITY)
                                .hint_text("optional"),
                        );
                        ui.end_row();
                    });
            });
        });
    }

    fn render_documents(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                match self.state.session.documents() {
                    Some(summary) => {
                        let counts = summary
                            .counts
                            .iter()
                            .map(|(status, count)| format!("{} {}", count, status))
                            .collect::<Vec<_>>()
                            .join(" | ");
                        ui.label(format!("📚 {} documents", summary.total()));
                        ui.label(RichText::new(counts).color(MUTED));
                    }
                    None => {
                        ui.label(RichText::new("Document list not loaded").color(MUTED));
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("🔄 Refresh").clicked() {
                        self.refresh_documents();
                    }
                });
            });
        });
    }

    fn render_dialog(&mut self, ctx: &egui::Context) {
        let mut open = true;
        egui::Window::new("Upload Documents")
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(520.0)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(
                    RichText::new("Drop in files or a folder. Each file is uploaded in turn.")
                        .color(MUTED),
                );
                ui.add_space(8.0);

                let idle = !self.state.session.is_uploading();
                ui.add_enabled_ui(idle, |ui| {
                    ui.checkbox(
                        &mut self.state.use_multimodal,
                        "✨ Advanced Multimodal Processing (Images, Tables, Equations)",
                    );
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("📄 Select Files").clicked() {
                            self.pick_files();
                        }
                        if ui.button("📁 Select Folder").clicked() {
                            self.pick_folder();
                        }
                        ui.label(
                            RichText::new(format!("Max {} per file", format_size(MAX_FILE_SIZE)))
                                .color(MUTED),
                        );
                    });
                });

                if !matches!(self.state.progress, ActionProgress::NotStarted) {
                    ui.add_space(10.0);
                    self.render_progress(ui);
                }

                if !self.state.session.files().is_empty() {
                    ui.add_space(10.0);
                    self.render_details(ui);
                }

                if let Some(error) = &self.state.error_message {
                    ui.add_space(5.0);
                    ui.colored_label(FAILURE, error);
                }
            });

        if !open {
            self.close_dialog();
        }
    }

    fn render_progress(&self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            let status_text = match &self.state.progress {
                ActionProgress::Completed { failed, .. } if *failed > 0 => {
                    "Upload Failed".to_string()
                }
                ActionProgress::Completed { .. } => "Upload Complete".to_string(),
                _ => match &self.state.current_file {
                    Some(file) => format!("📤 Uploading: {}", file),
                    None => "📤 Uploading".to_string(),
                },
            };
            ui.label(status_text);

            let progress_bar = egui::ProgressBar::new(self.state.get_progress_percentage())
                .show_percentage()
                .animate(self.state.session.is_uploading())
                .fill(ACCENT);
            ui.add(progress_bar);
            ui.label(self.state.get_status_text());
        });
    }

    fn render_details(&mut self, ui: &mut egui::Ui) {
        if ui
            .button(if self.state.show_details {
                "Hide Details"
            } else {
                "Show Details"
            })
            .clicked()
        {
            self.state.show_details = !self.state.show_details;
        }

        if !self.state.show_details {
            return;
        }

        let session = &self.state.session;
        egui::ScrollArea::vertical()
            .max_height(240.0)
            .show(ui, |ui| {
                egui::Frame::none()
                    .fill(ui.style().visuals.extreme_bg_color)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        for file in session.files() {
                            let index = session.index();
                            let progress = index.progress(&file.name);
                            ui.horizontal(|ui| {
                                match (index.error(&file.name), progress) {
                                    (Some(_), _) => ui.label("❌"),
                                    (None, Some(100)) => ui.label("✅"),
                                    (None, Some(_)) => ui.label("⏳"),
                                    (None, None) => ui.label("•"),
                                };
                                ui.label(&file.name);
                                ui.label(RichText::new(format_size(file.size)).color(MUTED));
                            });

                            if let Some(error) = index.error(&file.name) {
                                ui.colored_label(FAILURE, error);
                            } else if let Some(percent) = progress {
                                let color = if percent == 100 { SUCCESS } else { ACCENT };
                                ui.add(
                                    egui::ProgressBar::new(percent as f32 / 100.0).fill(color),
                                );
                            }
                            ui.add_space(4.0);
                        }
                    });
            });
    }

    fn render_toasts(&mut self, ctx: &egui::Context) {
        let mut dismissed = None;
        egui::Area::new("toasts")
            .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
            .show(ctx, |ui| {
                for toast in self.state.session.toasts() {
                    let (icon, color) = match toast.kind {
                        ToastKind::Loading => ("⏳", ACCENT),
                        ToastKind::Success => ("✅", SUCCESS),
                        ToastKind::Error => ("❌", FAILURE),
                    };
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(icon);
                            ui.colored_label(color, &toast.message);
                            if toast.kind != ToastKind::Loading && ui.small_button("✖").clicked() {
                                dismissed = Some(toast.id);
                            }
                        });
                    });
                    ui.add_space(4.0);
                }
            });

        if let Some(id) = dismissed {
            self.state.session.dismiss_toast(id);
        }
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Server:");
            if ui
                .add(
                    egui::Label::new(RichText::new(&self.server_url).color(ACCENT))
                        .sense(egui::Sense::click()),
                )
                .clicked()
            {
                if let Err(e) = open::that(&self.server_url) {
                    log::error!("Failed to open link: {}", e);
                }
            }
        });
    }
}
