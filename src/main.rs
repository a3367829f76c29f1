//! Host-side helper: `cargo run -- serve` builds the WASM site and serves
//! `static/` locally; `cargo run -- still` renders a pattern frame on the
//! CPU and writes it as PNG.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::process::{Command, Stdio};
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{bail, Context, Result};
    use clap::{Parser, Subcommand};
    use image::RgbaImage;

    use patternstudio::color::Rgb;
    use patternstudio::export::{encode_png, gallery_filename, pattern_filename};
    use patternstudio::gallery::thumbnail;
    use patternstudio::timing::Clock;
    use patternstudio::{cosmic, pixelate, ActivePattern, Mode, StudioConfig, StudioState};

    /// Pattern studio development helper
    #[derive(Parser, Debug)]
    #[command(author, version, about)]
    struct Args {
        #[command(subcommand)]
        command: Cmd,
    }

    #[derive(Subcommand, Debug)]
    enum Cmd {
        /// Build the wasm bundle into static/pkg and serve static/
        Serve {
            #[arg(long, default_value_t = 8000)]
            port: u16,
        },
        /// Render one frame of a pattern to PNG
        Still {
            /// `cosmic` or `pixelated`
            #[arg(long, default_value = "cosmic")]
            pattern: String,

            /// JSON studio config
            #[arg(short, long)]
            config: Option<PathBuf>,

            #[arg(long, default_value_t = 1280)]
            width: u32,

            #[arg(long, default_value_t = 720)]
            height: u32,

            /// Clock ticks to run before rendering
            #[arg(long, default_value_t = 0)]
            frames: u32,

            /// Stand-in camera frame for the pixelated pattern
            #[arg(long)]
            input: Option<PathBuf>,

            /// Output path, default `{pattern}-{millis}.png`
            #[arg(short, long)]
            out: Option<PathBuf>,

            /// Also write the gallery thumbnail of the frame
            #[arg(long)]
            thumbnail: bool,
        },
    }

    fn unix_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    fn write_png(path: &Path, image: &RgbaImage) -> Result<()> {
        let bytes = encode_png(image)?;
        fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {}", path.display());
        Ok(())
    }

    fn serve(port: u16) -> Result<()> {
        println!("wasm-pack → static/pkg");
        match Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
            .status()
        {
            Ok(st) if st.success() => {}
            Ok(st) => bail!("wasm-pack exited with {st}"),
            Err(e) => {
                log::warn!("could not run wasm-pack ({e}); serving the existing static/pkg");
            }
        }

        println!("Serving static/ on http://127.0.0.1:{port}");
        let mut server = Command::new("python3")
            .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("failed to start http server")?;
        server.wait()?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn still(
        pattern: &str,
        config: Option<PathBuf>,
        width: u32,
        height: u32,
        frames: u32,
        input: Option<PathBuf>,
        out: Option<PathBuf>,
        with_thumbnail: bool,
    ) -> Result<()> {
        let config = match config {
            Some(path) => StudioConfig::from_file(&path)?,
            None => StudioConfig::default(),
        };
        let mut state = StudioState::new(&config, width as f32, height as f32);
        state.set_mode(Mode::from_key(pattern));

        let clock = Clock::new(config.frame_step);
        state = (0..frames).fold(state, |s, _| clock.tick(s));

        let frame = match state.active() {
            ActivePattern::Cosmic(u) => cosmic::render(u, width, height),
            ActivePattern::Pixelated(u) => match input {
                Some(path) => {
                    let source = image::open(&path)
                        .with_context(|| format!("reading {}", path.display()))?
                        .to_rgba8();
                    pixelate::render(u, &source, width, height)
                }
                None => pixelate::render(u, &Rgb::new(0.5, 0.5, 0.5), width, height),
            },
        };

        let millis = unix_millis();
        let out = out.unwrap_or_else(|| PathBuf::from(pattern_filename(state.mode, millis)));
        write_png(&out, &frame)?;

        if with_thumbnail {
            let thumb = thumbnail(&frame, config.thumbnail_size);
            write_png(Path::new(&gallery_filename(millis)), &thumb)?;
        }
        Ok(())
    }

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        match Args::parse().command {
            Cmd::Serve { port } => serve(port),
            Cmd::Still {
                pattern,
                config,
                width,
                height,
                frames,
                input,
                out,
                thumbnail,
            } => still(&pattern, config, width, height, frames, input, out, thumbnail),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    host::run()
}

// Only meaningful on non-wasm targets.
#[cfg(target_arch = "wasm32")]
fn main() {}
