//! Session configuration - board shape, kind count, rotation budget
//!
//! Supplied once at session start and immutable afterwards. The playability
//! pattern is a row-delimited token string: a token that parses to integer 0
//! marks a blocked cell, every other token (including unparseable ones) is
//! playable. Short rows are padded to the longest row with playable cells.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Parsed playability mask for a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPattern {
    rows: usize,
    cols: usize,
    mask: Vec<bool>,
}

impl BoardPattern {
    /// Parse a pattern string. Total: malformed tokens degrade to playable
    /// cells, never to an error.
    pub fn parse(text: &str) -> Self {
        let mut parsed: Vec<Vec<bool>> = Vec::new();
        for line in text.lines() {
            let row: Vec<bool> = line
                .split_whitespace()
                .map(|tok| tok.parse::<i64>().map(|v| v != 0).unwrap_or(true))
                .collect();
            // A line with no tokens is not a row
            if !row.is_empty() {
                parsed.push(row);
            }
        }

        let cols = parsed.iter().map(|row| row.len()).max().unwrap_or(0);
        let rows = parsed.len();

        let mut mask = Vec::with_capacity(rows * cols);
        for mut row in parsed {
            row.resize(cols, true);
            mask.extend(row);
        }

        Self { rows, cols, mask }
    }

    /// Fully-playable pattern of the given dimensions
    pub fn filled(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            mask: vec![true; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_playable(&self, row: usize, col: usize) -> bool {
        self.mask[row * self.cols + col]
    }

    pub fn playable_count(&self) -> usize {
        self.mask.iter().filter(|&&p| p).count()
    }
}

/// Immutable session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Playability pattern source text (see module docs for the format)
    pub pattern: String,
    /// Number of tile kinds K; tiles carry kind indices in `0..K`
    pub kinds: u8,
    /// Rotation budget for the session
    pub max_rotations: u32,
    /// Reshuffle automatically when no valid move remains
    pub auto_shuffle: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pattern: vec!["1 1 1 1 1 1 1 1"; 8].join("\n"),
            kinds: 5,
            max_rotations: 3,
            auto_shuffle: true,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON document
    pub fn from_json(text: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the pattern text into a board mask
    pub fn board_pattern(&self) -> BoardPattern {
        BoardPattern::parse(&self.pattern)
    }

    /// Reject configurations the engine cannot run on
    pub fn validate(&self) -> Result<()> {
        if self.kinds < 2 {
            // With one kind every refill re-matches and the cascade loop
            // never drains
            bail!("tile kind count must be at least 2");
        }
        let pattern = self.board_pattern();
        if pattern.rows() == 0 || pattern.cols() == 0 {
            bail!("playability pattern is empty");
        }
        if pattern.playable_count() == 0 {
            bail!("playability pattern has no playable cell");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rectangular() {
        let p = BoardPattern::parse("1 1 1\n1 0 1\n1 1 1");
        assert_eq!(p.rows(), 3);
        assert_eq!(p.cols(), 3);
        assert!(p.is_playable(0, 0));
        assert!(!p.is_playable(1, 1));
        assert_eq!(p.playable_count(), 8);
    }

    #[test]
    fn test_parse_pads_short_rows_playable() {
        let p = BoardPattern::parse("1 0\n1 0 0 1");
        assert_eq!(p.rows(), 2);
        assert_eq!(p.cols(), 4);
        // Padded cells are playable
        assert!(p.is_playable(0, 2));
        assert!(p.is_playable(0, 3));
        assert!(!p.is_playable(0, 1));
        assert!(!p.is_playable(1, 2));
    }

    #[test]
    fn test_parse_garbage_tokens_are_playable() {
        let p = BoardPattern::parse("x 0 ? 1");
        assert_eq!(p.rows(), 1);
        assert_eq!(p.cols(), 4);
        assert!(p.is_playable(0, 0));
        assert!(!p.is_playable(0, 1));
        assert!(p.is_playable(0, 2));
        assert!(p.is_playable(0, 3));
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let p = BoardPattern::parse("1 1\n\n1 1\n");
        assert_eq!(p.rows(), 2);
    }

    #[test]
    fn test_parse_empty_text() {
        let p = BoardPattern::parse("");
        assert_eq!(p.rows(), 0);
        assert_eq!(p.cols(), 0);
        assert_eq!(p.playable_count(), 0);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        let p = config.board_pattern();
        assert_eq!((p.rows(), p.cols()), (8, 8));
        assert_eq!(p.playable_count(), 64);
    }

    #[test]
    fn test_validate_rejects_degenerate() {
        let mut config = EngineConfig::default();
        config.kinds = 0;
        assert!(config.validate().is_err());
        config.kinds = 1;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.pattern = String::new();
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.pattern = "0 0\n0 0".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back = EngineConfig::from_json(&json).unwrap();
        assert_eq!(back.kinds, config.kinds);
        assert_eq!(back.pattern, config.pattern);
        assert_eq!(back.max_rotations, config.max_rotations);
        assert_eq!(back.auto_shuffle, config.auto_shuffle);
    }
}
