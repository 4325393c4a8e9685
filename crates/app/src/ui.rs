//! egui window: toolbar, thumbnail sidebar, page view and modal prompts.

use crate::controller::{Editor, EditorError};
use log::error;
use pdf_engine::RgbaImage;
use std::path::PathBuf;
use viewer_core::{pdf_filter, Action, RotationChoice};

/// Textures for one render pass, rebuilt whenever the state generation moves.
#[derive(Default)]
struct PageTextures {
    generation: u64,
    pages: Vec<egui::TextureHandle>,
    thumbnails: Vec<egui::TextureHandle>,
}

struct ErrorDialogState {
    title: String,
    message: String,
}

#[derive(Default)]
struct RemovePagePrompt {
    input: String,
}

pub struct PdfEditorApp {
    editor: Editor,
    textures: PageTextures,
    error_dialog: Option<ErrorDialogState>,
    remove_prompt: Option<RemovePagePrompt>,
    rotate_prompt: bool,
}

fn to_color_image(image: &RgbaImage) -> egui::ColorImage {
    let (width, height) = image.dimensions();
    egui::ColorImage::from_rgba_unmultiplied([width as usize, height as usize], image.as_raw())
}

impl PdfEditorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, editor: Editor) -> Self {
        Self {
            editor,
            textures: PageTextures::default(),
            error_dialog: None,
            remove_prompt: None,
            rotate_prompt: false,
        }
    }

    fn report(&mut self, err: EditorError) {
        error!("{err}");
        self.error_dialog =
            Some(ErrorDialogState { title: err.title().to_string(), message: err.to_string() });
    }

    fn run(&mut self, result: Result<(), EditorError>) {
        if let Err(err) = result {
            self.report(err);
        }
    }

    fn sync_textures(&mut self, ctx: &egui::Context) {
        let state = self.editor.state();
        if self.textures.generation == state.generation() {
            return;
        }

        let mut textures = PageTextures { generation: state.generation(), ..Default::default() };
        if let Some(doc) = state.loaded() {
            for (index, page) in doc.pages().iter().enumerate() {
                textures.pages.push(ctx.load_texture(
                    format!("page_{index}"),
                    to_color_image(page),
                    egui::TextureOptions::LINEAR,
                ));
            }
            for (index, thumb) in doc.thumbnails().iter().enumerate() {
                textures.thumbnails.push(ctx.load_texture(
                    format!("thumb_{index}"),
                    to_color_image(thumb),
                    egui::TextureOptions::LINEAR,
                ));
            }
        }
        self.textures = textures;
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::Open => self.open_file(),
            Action::Save => self.save_file(),
            Action::RemovePage => self.remove_prompt = Some(RemovePagePrompt::default()),
            Action::Rotate => self.rotate_prompt = true,
            Action::ZoomIn => {
                let result = self.editor.zoom_in();
                self.run(result);
            }
            Action::ZoomOut => {
                let result = self.editor.zoom_out();
                self.run(result);
            }
            Action::Compress => self.compress_file(),
            Action::ExportImages => self.export_images(),
            Action::ConvertToWord => self.convert_to_word(),
        }
    }

    fn pdf_dialog() -> rfd::FileDialog {
        let filter = pdf_filter();
        rfd::FileDialog::new().add_filter(filter.label(), &[filter.extension()])
    }

    fn open_file(&mut self) {
        if let Some(path) = Self::pdf_dialog().pick_file() {
            let result = self.editor.open(path);
            self.run(result);
        }
    }

    fn suggested_name(&self, suffix: &str) -> String {
        let stem = self
            .editor
            .state()
            .current_path()
            .ok()
            .and_then(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        format!("{stem}{suffix}.pdf")
    }

    fn save_file(&mut self) {
        let name = self.suggested_name("");
        if let Some(dest) = Self::pdf_dialog().set_file_name(name).save_file() {
            let result = self.editor.save_to(&dest).map(|_| ());
            self.run(result);
        }
    }

    fn compress_file(&mut self) {
        let name = self.suggested_name("_compressed");
        if let Some(dest) = Self::pdf_dialog().set_file_name(name).save_file() {
            let result = self.editor.compress_to(&dest).map(|_| ());
            self.run(result);
        }
    }

    fn export_images(&mut self) {
        if let Some(dir) = rfd::FileDialog::new().pick_folder() {
            let result = self.editor.export_images_to(&dir).map(|_| ());
            self.run(result);
        }
    }

    fn convert_to_word(&mut self) {
        let dest = self
            .editor
            .state()
            .current_path()
            .map(|path| path.with_extension("docx"))
            .unwrap_or_else(|_| PathBuf::from("document.docx"));
        let result = self.editor.convert_to_word(&dest);
        self.run(result);
    }
}

impl eframe::App for PdfEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard_shortcuts(ctx);
        self.sync_textures(ctx);
        self.draw_toolbar(ctx);
        self.draw_status_bar(ctx);
        self.draw_sidebar(ctx);
        self.draw_pages(ctx);
        self.draw_remove_prompt(ctx);
        self.draw_rotate_prompt(ctx);
        self.draw_error_dialog(ctx);
    }
}

impl PdfEditorApp {
    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let mut action = None;

        ctx.input(|i| {
            let cmd = i.modifiers.command;
            if cmd && i.key_pressed(egui::Key::O) {
                action = Some(Action::Open);
            } else if cmd && i.key_pressed(egui::Key::S) {
                action = Some(Action::Save);
            } else if cmd && (i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals)) {
                action = Some(Action::ZoomIn);
            } else if cmd && i.key_pressed(egui::Key::Minus) {
                action = Some(Action::ZoomOut);
            }

            if i.key_pressed(egui::Key::Escape) {
                if self.error_dialog.is_some() {
                    self.error_dialog = None;
                } else {
                    self.remove_prompt = None;
                    self.rotate_prompt = false;
                }
            }
        });

        if let Some(action) = action.filter(|&action| self.editor.state().is_enabled(action)) {
            self.dispatch(action);
        }
    }

    fn draw_toolbar(&mut self, ctx: &egui::Context) {
        let mut clicked = None;

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add_space(8.0);
                for action in Action::TOOLBAR {
                    if action.starts_group() {
                        ui.separator();
                    }
                    let enabled = self.editor.state().is_enabled(action);
                    if ui.add_enabled(enabled, egui::Button::new(action.label())).clicked() {
                        clicked = Some(action);
                    }
                }

                ui.separator();
                ui.label(format!("{}%", self.editor.state().zoom().percent()));
            });
        });

        if let Some(action) = clicked {
            self.dispatch(action);
        }
    }

    fn draw_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.editor.state().status());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(self.editor.rasterizer_name());
                });
            });
        });
    }

    fn draw_sidebar(&mut self, ctx: &egui::Context) {
        let mut clicked_page = None;

        egui::SidePanel::left("thumbnails")
            .default_width(130.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading("Pages");
                ui.separator();

                if !self.editor.state().is_loaded() {
                    ui.weak("No document loaded");
                    return;
                }

                egui::ScrollArea::vertical().show(ui, |ui| {
                    for (page, thumb) in self.textures.thumbnails.iter().enumerate() {
                        let response = egui::Frame::NONE
                            .stroke(egui::Stroke::new(
                                1.0,
                                ui.visuals().widgets.inactive.bg_stroke.color,
                            ))
                            .inner_margin(2.0)
                            .corner_radius(4.0)
                            .show(ui, |ui| {
                                ui.vertical_centered(|ui| {
                                    ui.image(thumb);
                                    ui.small(format!("{}", page + 1));
                                });
                            });

                        if response.response.interact(egui::Sense::click()).clicked() {
                            clicked_page = Some(page);
                        }
                        ui.add_space(4.0);
                    }
                });
            });

        if let Some(page) = clicked_page {
            self.editor.go_to_page(page);
        }
    }

    fn draw_pages(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.editor.state().is_loaded() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a PDF to get started");
                });
                return;
            }

            let target = self.editor.take_scroll_target();

            egui::ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    for (index, page) in self.textures.pages.iter().enumerate() {
                        let response = ui.image(page);
                        if target == Some(index) {
                            response.scroll_to_me(Some(egui::Align::TOP));
                        }
                        ui.add_space(10.0);
                    }
                });
            });
        });
    }

    fn draw_remove_prompt(&mut self, ctx: &egui::Context) {
        let Some(prompt) = &mut self.remove_prompt else {
            return;
        };

        let page_count = self.editor.state().page_count();
        let mut should_close = false;
        let mut confirmed = false;

        egui::Window::new("Remove Page")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("Enter page number to remove (1-{page_count}):"));
                let response = ui.add(
                    egui::TextEdit::singleline(&mut prompt.input)
                        .desired_width(80.0)
                        .hint_text("1"),
                );
                response.request_focus();
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    confirmed = true;
                }

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        should_close = true;
                    }
                    if ui.button("OK").clicked() {
                        confirmed = true;
                    }
                });
            });

        if confirmed {
            let input = std::mem::take(&mut prompt.input);
            self.remove_prompt = None;
            let result = self.editor.remove_page_from_input(&input).map(|_| ());
            self.run(result);
        } else if should_close {
            self.remove_prompt = None;
        }
    }

    fn draw_rotate_prompt(&mut self, ctx: &egui::Context) {
        if !self.rotate_prompt {
            return;
        }

        let mut chosen = None;
        let mut should_close = false;

        egui::Window::new("Rotate PDF")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Select rotation angle:");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    for choice in RotationChoice::ALL {
                        if ui.button(choice.label()).clicked() {
                            chosen = Some(choice);
                        }
                    }
                });
                ui.add_space(12.0);
                if ui.button("Cancel").clicked() {
                    should_close = true;
                }
            });

        if let Some(choice) = chosen {
            self.rotate_prompt = false;
            let result = self.editor.rotate(choice);
            self.run(result);
        } else if should_close {
            self.rotate_prompt = false;
        }
    }

    fn draw_error_dialog(&mut self, ctx: &egui::Context) {
        let Some(error) = &self.error_dialog else {
            return;
        };

        let mut should_close = false;
        egui::Window::new(error.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&error.message);
                ui.add_space(12.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.button("OK").clicked() {
                        should_close = true;
                    }
                });
            });

        if should_close {
            self.error_dialog = None;
        }
    }
}
