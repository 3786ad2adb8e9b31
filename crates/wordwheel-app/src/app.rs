//! Headless application shell.
//!
//! Replays a script of pointer events and button actions against a
//! [`Game`], prints every notification as a JSON line and renders the final
//! frame to SVG.

use crate::script::{Action, ScriptError, ScriptStep, parse_line};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;
use wordwheel_core::dictionary::{CachedDictionary, Dictionary, WordListDictionary};
use wordwheel_core::storage::FileStorage;
use wordwheel_core::{
    ConfigError, Game, GameConfig, GameEvent, SessionStore, StorageError, Word,
};
use wordwheel_render::{RenderContext, Renderer, RendererError, SvgRenderer};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Replay a pointer script from stdin and print notifications as JSON lines.
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "wordwheel")]
#[command(about = "Headless WordWheel: replays pointer scripts and renders SVG", long_about = None)]
pub struct AppConfig {
    /// Game configuration JSON; defaults are used when absent.
    #[arg(long = "config", value_name = "FILE")]
    pub config_path: Option<PathBuf>,
    /// Newline-separated word list checked on submit.
    #[arg(long = "dictionary", value_name = "FILE")]
    pub dictionary_path: Option<PathBuf>,
    /// Directory for the session store; no session when absent.
    #[arg(long = "storage", value_name = "DIR")]
    pub storage_dir: Option<PathBuf>,
    /// Where to write the final frame.
    #[arg(long = "svg", value_name = "FILE")]
    pub svg_path: Option<PathBuf>,
    /// Seed for shuffles, for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// The running application.
pub struct App {
    game: Game,
    rng: SmallRng,
    dictionary: Option<CachedDictionary<WordListDictionary>>,
    session: Option<SessionStore<FileStorage>>,
    svg_path: Option<PathBuf>,
}

impl App {
    /// Load everything the configuration points at.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let game_config = match &config.config_path {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                GameConfig::from_json(&fs::read_to_string(path)?)?
            }
            None => GameConfig::default(),
        };
        let mut game = Game::new(game_config)?;

        let session = match &config.storage_dir {
            Some(dir) => Some(SessionStore::new(FileStorage::new(dir.clone())?)),
            None => None,
        };
        if let Some(session) = &session {
            let identity = session.device_identity()?;
            log::info!("Device identity {}", identity);
            let slots = session.load_rack();
            if let Err(e) = game.restore_rack(&slots) {
                log::warn!("Stored rack not usable, keeping configured rack: {}", e);
            }
        }

        let dictionary = match &config.dictionary_path {
            Some(path) => {
                let words = WordListDictionary::from_text(&fs::read_to_string(path)?);
                Some(CachedDictionary::new(words))
            }
            None => None,
        };

        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        Ok(Self {
            game,
            rng,
            dictionary,
            session,
            svg_path: config.svg_path,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn dictionary(&self) -> Option<&CachedDictionary<WordListDictionary>> {
        self.dictionary.as_ref()
    }

    /// Apply one script step.
    pub fn apply(&mut self, step: ScriptStep) -> Vec<GameEvent> {
        match step {
            ScriptStep::Pointer(event) => self.game.handle_pointer_event(event),
            ScriptStep::Action(action) => self.apply_action(action),
        }
    }

    fn apply_action(&mut self, action: Action) -> Vec<GameEvent> {
        match action {
            Action::Add => return self.game.add_word(),
            Action::ClearSelection => self.game.clear_selection(),
            Action::ClearWords => self.game.clear_words(),
            Action::Submit => {
                let event = self.game.submit();
                if let GameEvent::WordsSubmitted { words } = &event {
                    self.check_words(words);
                }
                return vec![event];
            }
            Action::ShuffleWheel => self.game.shuffle_wheel(&mut self.rng),
            Action::ShuffleRack => self.game.shuffle_rack(&mut self.rng),
            Action::ResetBoard => self.game.reset_board(),
            Action::Refill { letters } => {
                if let Err(e) = self.game.refill_rack(&letters) {
                    log::warn!("Refill ignored: {}", e);
                }
            }
            Action::SetLetters { letters } => {
                if let Err(e) = self.game.set_letters(letters) {
                    log::warn!("Letter change ignored: {}", e);
                }
            }
        }
        Vec::new()
    }

    fn check_words(&self, words: &[Word]) {
        let Some(dictionary) = &self.dictionary else {
            return;
        };
        for word in words {
            match dictionary.lookup(word.as_str()) {
                Some(entry) => log::info!("{} is a word ({})", word, entry.word),
                None => log::info!("{} is not in the dictionary", word),
            }
        }
    }

    /// Replay a script, writing each notification as a JSON line.
    ///
    /// Stops at the first malformed line.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> AppResult<()> {
        for (index, line) in input.lines().enumerate() {
            let Some(step) = parse_line(index + 1, &line?)? else {
                continue;
            };
            for event in self.apply(step) {
                writeln!(output, "{}", serde_json::to_string(&event)?)?;
            }
        }
        output.flush()?;
        self.finish()
    }

    /// Render the final frame and persist the session.
    fn finish(&mut self) -> AppResult<()> {
        if let Some(path) = &self.svg_path {
            let scene = self.game.scene();
            let mut renderer = SvgRenderer::new();
            renderer.build_scene(&RenderContext::new(&scene))?;
            fs::write(path, renderer.take_svg())?;
            log::info!("Wrote {}", path.display());
        }
        if let Some(session) = &self.session {
            session.save_rack(self.game.rack().slots())?;
        }
        Ok(())
    }
}
