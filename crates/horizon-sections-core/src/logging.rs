//! Logging and debugging facilities for Horizon Sections.
//!
//! This module provides:
//! - Target and span names for the `tracing` instrumentation used across the
//!   reconciliation crates
//! - A small tree writer used to dump model trees and edit scripts
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! Horizon Sections uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_sections::diff=trace,horizon_sections::driver=debug")
//!     .init();
//! ```
//!
//! # Tree Output
//!
//! [`TreeWriter`] renders indented, branch-decorated lines. The
//! `horizon-sections` crate builds its model tree dump on top of it.
//!
//! ```
//! use horizon_sections_core::logging::{TreeFormatOptions, TreeStyle, TreeWriter};
//!
//! let mut writer = TreeWriter::new(TreeFormatOptions {
//!     style: TreeStyle::Ascii,
//!     ..Default::default()
//! });
//! writer.line(0, true, "tree");
//! writer.line(1, false, "section 0");
//! writer.line(1, true, "section 1");
//! assert!(writer.finish().contains("+-- section 0"));
//! ```

use std::fmt::Write as FmtWrite;

/// Span names used throughout Horizon Sections for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Surface transaction span.
    pub const TRANSACTION: &str = "horizon_sections::transaction";
    /// Reuse descriptor registration span.
    pub const REGISTRATION: &str = "horizon_sections::registration";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_sections_core::signal";
    /// Thread affinity checks.
    pub const THREAD: &str = "horizon_sections_core::thread_check";
    /// Diff engine target.
    pub const DIFF: &str = "horizon_sections::diff";
    /// Driver target (commits, queries, events).
    pub const DRIVER: &str = "horizon_sections::driver";
    /// Reuse registry target.
    pub const REGISTRY: &str = "horizon_sections::registry";
    /// Surface command target.
    pub const SURFACE: &str = "horizon_sections::surface";
    /// Performance spans.
    pub const PERF: &str = "horizon_sections::perf";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line-per-node representation without branches.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show reuse identifiers next to each model.
    pub show_reuse: bool,
    /// Whether to show explicit sizes next to each model.
    pub show_sizes: bool,
    /// Maximum depth to render (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_reuse: true,
            show_sizes: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for minimal output (labels only).
    pub fn minimal() -> Self {
        Self {
            show_reuse: false,
            show_sizes: false,
            ..Default::default()
        }
    }

    /// Set the tree style.
    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    /// Limit the rendered depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Incremental writer for branch-decorated tree output.
///
/// Lines must be written in depth-first order. The writer remembers, for
/// every open ancestor level, whether that ancestor was the last child so it
/// can draw continuation bars correctly.
#[derive(Debug, Clone)]
pub struct TreeWriter {
    options: TreeFormatOptions,
    output: String,
    open_levels: Vec<bool>,
}

impl TreeWriter {
    /// Create a writer with the given options.
    pub fn new(options: TreeFormatOptions) -> Self {
        Self {
            options,
            output: String::new(),
            open_levels: Vec::new(),
        }
    }

    /// The options this writer was created with.
    pub fn options(&self) -> &TreeFormatOptions {
        &self.options
    }

    /// Returns `true` if a node at `depth` would be rendered.
    pub fn accepts(&self, depth: usize) -> bool {
        self.options.max_depth.is_none_or(|max| depth <= max)
    }

    /// Write one node line.
    pub fn line(&mut self, depth: usize, is_last: bool, text: &str) {
        if !self.accepts(depth) {
            return;
        }
        self.open_levels.truncate(depth);
        let prefix = self.build_prefix(depth, is_last);
        self.open_levels.push(is_last);
        // Writing to a String cannot fail.
        let _ = writeln!(self.output, "{prefix}{text}");
    }

    /// Consume the writer and return the accumulated output.
    pub fn finish(self) -> String {
        self.output
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();

        // Levels 1..depth are ancestors; level 0 is the root and never draws a bar.
        for level in 1..depth {
            let ancestor_last = self.open_levels.get(level).copied().unwrap_or(true);
            if self.options.style == TreeStyle::Compact {
                prefix.push(' ');
                continue;
            }
            prefix.push_str(if ancestor_last { " " } else { branch });
            prefix.extend(std::iter::repeat_n(' ', self.options.indent_size));
        }

        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
