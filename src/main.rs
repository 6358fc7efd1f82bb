mod audio;
mod cli;

use audio::Audio;
use clap::Parser;
use cli::Args;
use eframe::egui;
use egui::{Color32, Event, Key, Pos2, Rect, RichText, Rounding, TopBottomPanel};
use ocho::{Interpreter, Options, Rom, Status, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use std::process::ExitCode;
use std::time::Instant;

/// The conventional desktop binding of the hexadecimal keypad: the 1-4 row
/// through the Z-V row map to keypad columns 1/2/3/C through A/0/B/F.
const KEYPAD_BINDINGS: [(Key, u8); 16] = [
    (Key::Num1, 0x1),
    (Key::Num2, 0x2),
    (Key::Num3, 0x3),
    (Key::Num4, 0xC),
    (Key::Q, 0x4),
    (Key::W, 0x5),
    (Key::E, 0x6),
    (Key::R, 0xD),
    (Key::A, 0x7),
    (Key::S, 0x8),
    (Key::D, 0x9),
    (Key::F, 0xE),
    (Key::Z, 0xA),
    (Key::X, 0x0),
    (Key::C, 0xB),
    (Key::V, 0xF),
];

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let options = match &args.options {
        Some(path) => match Options::load_from_file(path) {
            Ok(options) => options,
            Err(error) => {
                eprintln!("ocho: {}", error);
                return ExitCode::FAILURE;
            }
        },
        None => Options::default(),
    };

    let rom = match Rom::from_file(&args.rom) {
        Ok(rom) => rom,
        Err(error) => {
            eprintln!("ocho: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let mut interpreter = Interpreter::with_options(options);
    if let Err(error) = interpreter.load_rom(rom) {
        eprintln!("ocho: {}", error);
        return ExitCode::FAILURE;
    }

    let native_options = eframe::NativeOptions {
        initial_window_size: Some(egui::Vec2::new(
            (DISPLAY_WIDTH as u32 * args.scale) as f32,
            (DISPLAY_HEIGHT as u32 * args.scale) as f32,
        )),
        ..Default::default()
    };
    let app = OchoApp::new(interpreter, options, &args);
    match eframe::run_native(
        &format!("Ocho - {}", args.rom.display()),
        native_options,
        Box::new(|_cc| Box::new(app)),
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("ocho: {}", error);
            ExitCode::FAILURE
        }
    }
}

struct OchoApp {
    interpreter: Interpreter,
    audio: Option<Audio>,
    clock: Instant,
    steps_per_frame: u32,
    foreground: Color32,
    background: Color32,
}

impl OchoApp {
    fn new(interpreter: Interpreter, options: Options, args: &Args) -> Self {
        let audio = if args.mute {
            None
        } else {
            Audio::new(args.volume)
        };
        OchoApp {
            interpreter,
            audio,
            clock: Instant::now(),
            steps_per_frame: args.steps.unwrap_or(options.steps_per_frame),
            foreground: Color32::from_rgb(args.fg[0], args.fg[1], args.fg[2]),
            background: Color32::from_rgb(args.bg[0], args.bg[1], args.bg[2]),
        }
    }

    /// Forwards keypad state changes to the interpreter and handles the
    /// host control keys (Space pauses/resumes, Enter restarts).
    fn handle_input(&mut self, ctx: &egui::Context) {
        let mut events: Vec<(Key, bool)> = Vec::new();
        ctx.input(|input| {
            for event in &input.events {
                if let Event::Key { key, pressed, .. } = event {
                    events.push((*key, *pressed));
                }
            }
        });
        for (key, pressed) in events {
            for (binding, ordinal) in KEYPAD_BINDINGS {
                if key == binding {
                    if let Err(_) = self.interpreter.set_key(ordinal, pressed) {
                        // Ordinals come from the binding table; absorb
                    }
                }
            }
            if pressed && key == Key::Space {
                self.toggle_pause();
            }
            if pressed && key == Key::Enter {
                self.interpreter.reset();
            }
        }
    }

    fn toggle_pause(&mut self) {
        match self.interpreter.status() {
            Status::Running => self.interpreter.pause(),
            Status::Paused => self.interpreter.resume(),
            Status::Stopped | Status::Error(_) => (),
        }
    }

    /// Resumes or pauses the beep sink so it tracks the sound timer.
    fn gate_audio(&self) {
        if let Some(audio) = &self.audio {
            match (self.interpreter.beep_on(), audio.is_paused()) {
                (true, true) => audio.play(),
                (false, false) => audio.pause(),
                _ => (),
            }
        }
    }

    fn render_footer(&self, ctx: &egui::Context) {
        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let (caption, colour) = match self.interpreter.status() {
                    Status::Running => ("Running".to_string(), Color32::GREEN),
                    Status::Paused => ("Paused".to_string(), Color32::YELLOW),
                    Status::Stopped => ("Stopped".to_string(), Color32::RED),
                    Status::Error(kind) => (format!("Error: {}", kind), Color32::RED),
                };
                ui.label(RichText::new(caption).color(colour));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label("Space pauses - Enter restarts");
                });
            });
        });
    }

    /// Paints the interpreter frame buffer as filled rects scaled to the
    /// central panel.
    fn render_display(&self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(self.background))
            .show(ctx, |ui| {
                let painter = ui.painter();
                let pixel_width = ui.available_width() / DISPLAY_WIDTH as f32;
                let pixel_height = ui.available_height() / DISPLAY_HEIGHT as f32;
                let origin = ui.min_rect().min;
                let frame = self.interpreter.frame();
                for y in 0..DISPLAY_HEIGHT {
                    for x in 0..DISPLAY_WIDTH {
                        if !frame[y * DISPLAY_WIDTH + x] {
                            continue;
                        }
                        painter.rect_filled(
                            Rect::from_min_max(
                                Pos2::new(
                                    origin.x + x as f32 * pixel_width,
                                    origin.y + y as f32 * pixel_height,
                                ),
                                Pos2::new(
                                    origin.x + (x + 1) as f32 * pixel_width,
                                    origin.y + (y + 1) as f32 * pixel_height,
                                ),
                            ),
                            Rounding::none(),
                            self.foreground,
                        );
                    }
                }
            });
    }
}

impl eframe::App for OchoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Refresh the keypad snapshot before stepping
        self.handle_input(ctx);
        // Run the step batch for this frame, then drain the timers against
        // the monotonic clock and gate the beep from the result
        for _ in 0..self.steps_per_frame {
            self.interpreter.step();
        }
        self.interpreter
            .tick_timers(self.clock.elapsed().as_nanos() as u64);
        self.gate_audio();
        self.render_footer(ctx);
        self.render_display(ctx);
        // Update the UI again as soon as possible
        ctx.request_repaint();
    }
}
