//! Opt-in JSON-lines session log.
//!
//! One record per line, each stamped with milliseconds since the session
//! started:
//!
//! ```text
//! {"t_ms":0,"event":"start","seed":7,"width":10,"height":20,"level":1}
//! {"t_ms":1840,"event":"lock","piece":"t","lines":2,"tspin":true,...}
//! {"t_ms":90210,"event":"game_over","score":15200,"level":6,"lines":48}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::engine::Game;
use crate::types::LockEvent;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionRecord {
    Start {
        seed: Option<u64>,
        width: u16,
        height: u16,
        level: u32,
    },
    Lock {
        piece: &'static str,
        lines: u32,
        tspin: bool,
        perfect_clear: bool,
        back_to_back: bool,
        combo: u32,
        score_delta: u64,
        clear: &'static str,
        level: u32,
        score: u64,
    },
    GameOver {
        score: u64,
        level: u32,
        lines: u32,
    },
    Restart,
    Quit {
        score: u64,
    },
}

impl SessionRecord {
    pub fn start(game: &Game) -> Self {
        let config = game.config();
        SessionRecord::Start {
            seed: config.seed,
            width: config.board_width,
            height: config.board_height,
            level: game.level(),
        }
    }

    pub fn lock(event: &LockEvent, score: u64) -> Self {
        SessionRecord::Lock {
            piece: event.kind.as_str(),
            lines: event.lines_cleared,
            tspin: event.tspin,
            perfect_clear: event.perfect_clear,
            back_to_back: event.back_to_back,
            combo: event.combo,
            score_delta: event.score_delta,
            clear: event.clear_kind.as_str(),
            level: event.level,
            score,
        }
    }

    pub fn game_over(game: &Game) -> Self {
        SessionRecord::GameOver {
            score: game.score(),
            level: game.level(),
            lines: game.lines(),
        }
    }
}

#[derive(Serialize)]
struct Stamped<'a> {
    t_ms: u64,
    #[serde(flatten)]
    record: &'a SessionRecord,
}

pub struct SessionLog<W: Write> {
    out: W,
    started: Instant,
}

impl SessionLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn append_to(path: &Path, started: Instant) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open session log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file), started))
    }
}

impl<W: Write> SessionLog<W> {
    pub fn new(out: W, started: Instant) -> Self {
        Self { out, started }
    }

    pub fn record(&mut self, now: Instant, record: &SessionRecord) -> Result<()> {
        let stamped = Stamped {
            t_ms: now.saturating_duration_since(self.started).as_millis() as u64,
            record,
        };
        serde_json::to_writer(&mut self.out, &stamped)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::Value;

    use crate::types::{ClearKind, PieceKind};

    fn lines(log: SessionLog<Vec<u8>>) -> Vec<Value> {
        let bytes = log.into_inner();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn records_are_tagged_and_stamped() {
        let t0 = Instant::now();
        let mut log = SessionLog::new(Vec::new(), t0);
        log.record(t0, &SessionRecord::Restart).unwrap();
        log.record(
            t0 + Duration::from_millis(1500),
            &SessionRecord::Quit { score: 42 },
        )
        .unwrap();

        let out = lines(log);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["event"], "restart");
        assert_eq!(out[0]["t_ms"], 0);
        assert_eq!(out[1]["event"], "quit");
        assert_eq!(out[1]["score"], 42);
        assert_eq!(out[1]["t_ms"], 1500);
    }

    #[test]
    fn lock_record_uses_readable_names() {
        let event = LockEvent {
            kind: PieceKind::T,
            lines_cleared: 2,
            tspin: true,
            perfect_clear: false,
            back_to_back: false,
            combo: 0,
            score_delta: 1000,
            clear_kind: ClearKind::TSpin,
            level: 3,
        };
        let t0 = Instant::now();
        let mut log = SessionLog::new(Vec::new(), t0);
        log.record(t0, &SessionRecord::lock(&event, 1000)).unwrap();

        let out = lines(log);
        assert_eq!(out[0]["event"], "lock");
        assert_eq!(out[0]["piece"], "t");
        assert_eq!(out[0]["clear"], "t-spin");
        assert_eq!(out[0]["tspin"], true);
        assert_eq!(out[0]["score"], 1000);
    }
}
