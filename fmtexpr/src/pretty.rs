//! RcDoc-based introspection printer with termcolor annotations for [`Pack`].
//!
//! Role
//! - Convert a pack into an annotated document listing every element and the aggregate
//!   dependency classification.
//! - Provide colored output for terminals (TTY-aware) and plain strings for logs/tests.
//!
//! Layout
//! ```text
//! element 0:
//!   type: value
//!   fmtexpr type: value<a, unspecified, integer>
//!   linked variable: a
//!   dependencies (0):
//!   description: unspecified
//!   value: 1 (integer)
//! ...
//! dependencies: a, c
//! satisfied dependencies: a
//! duplicate bindings:
//! unsatisfied dependencies: c
//! ```
use std::io::{self, Write};

use pretty::{RcDoc, RenderAnnotated};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::{
    ident::{Ident, LabelProvider, LabelStyle},
    pack::Pack,
    report::{ElementReport, PayloadSummary},
};

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Punct, // colons, commas
    Heading,
    Key,
    Ident,
    Type,
    Value,
    /// Placeholders such as `none` or `(unevaluated statement)`.
    Missing,
    /// Violations: duplicate and unsatisfied identities.
    Error,
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Punct => {
                s.set_dimmed(true);
            }
            Style::Heading => {
                s.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            Style::Key => {
                s.set_fg(Some(Color::Blue));
            }
            Style::Ident => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
            Style::Type => {
                s.set_fg(Some(Color::Magenta));
            }
            Style::Value => {
                s.set_fg(Some(Color::Yellow));
            }
            Style::Missing => {
                s.set_dimmed(true).set_italic(true);
            }
            Style::Error => {
                s.set_fg(Some(Color::Red)).set_bold(true);
            }
        }
        s
    }
}

/// Rendering configuration.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Line width; `None` uses the terminal width, or 80 if it cannot be determined.
    pub width: Option<usize>,
    pub labels: LabelStyle,
    pub color: ColorChoice,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: None,
            labels: LabelStyle::Name,
            color: ColorChoice::Auto,
        }
    }
}

impl RenderOptions {
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_labels(mut self, labels: LabelStyle) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Effective line width.
    pub fn resolved_width(&self) -> usize {
        self.width.unwrap_or_else(terminal_width)
    }
}

fn styled(style: Style, s: impl Into<String>) -> RcDoc<'static, Style> {
    RcDoc::text(s.into()).annotate(style)
}

fn key(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Key, s).append(styled(Style::Punct, ":"))
}

fn ident_list(idents: &[Ident], labels: &dyn LabelProvider, style: Style) -> RcDoc<'static, Style> {
    RcDoc::intersperse(
        idents.iter().map(|ident| styled(style, labels.label(ident))),
        styled(Style::Punct, ",").append(RcDoc::line()),
    )
    .nest(2)
    .group()
}

fn entry(name: &'static str, body: RcDoc<'static, Style>) -> RcDoc<'static, Style> {
    key(name).append(RcDoc::space()).append(body)
}

fn payload_doc(payload: PayloadSummary<'_>) -> RcDoc<'static, Style> {
    match payload {
        PayloadSummary::Value(_) | PayloadSummary::Literal(_) => {
            styled(Style::Value, payload.to_string())
        }
        PayloadSummary::UnevaluatedDeclaration | PayloadSummary::UnevaluatedExpression => {
            styled(Style::Missing, payload.to_string())
        }
    }
}

fn element_doc(report: &ElementReport<'_>, labels: &dyn LabelProvider) -> RcDoc<'static, Style> {
    let binding = match report.binding() {
        Some(ident) => styled(Style::Ident, labels.label(ident)),
        None => styled(Style::Missing, "none"),
    };
    let dependencies = report.dependencies();
    let description = match report.descriptor() {
        Some(descriptor) => styled(Style::Type, descriptor.label(labels)),
        None => styled(Style::Missing, "none"),
    };

    let fields = [
        entry("type", styled(Style::Type, report.kind().to_str())),
        entry("fmtexpr type", styled(Style::Type, report.declared_type(labels))),
        entry("linked variable", binding),
        key("dependencies")
            .append(styled(Style::Punct, format!(" ({})", dependencies.len())))
            .append(RcDoc::space())
            .append(ident_list(dependencies, labels, Style::Ident)),
        entry("description", description),
        entry("value", payload_doc(report.payload())),
    ];

    styled(Style::Heading, format!("element {}", report.index))
        .append(styled(Style::Punct, ":"))
        .append(
            RcDoc::hardline()
                .append(RcDoc::intersperse(fields, RcDoc::hardline()))
                .nest(2),
        )
}

fn to_doc(pack: &Pack, options: &RenderOptions) -> RcDoc<'static, Style> {
    let labels: &dyn LabelProvider = &options.labels;
    let report = pack.dependency_report();
    let satisfied = report.satisfied_dependencies();

    let elements = pack
        .element_reports()
        .map(|element| element_doc(&element, labels));
    let summary = [
        entry(
            "dependencies",
            ident_list(report.all_dependencies(), labels, Style::Ident),
        ),
        entry(
            "satisfied dependencies",
            ident_list(&satisfied, labels, Style::Ident),
        ),
        entry(
            "duplicate bindings",
            ident_list(report.duplicate_bindings(), labels, Style::Error),
        ),
        entry(
            "unsatisfied dependencies",
            ident_list(report.unsatisfied_dependencies(), labels, Style::Error),
        ),
    ];

    RcDoc::intersperse(elements.chain(summary), RcDoc::hardline()).append(RcDoc::hardline())
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

fn render_to<W: WriteColor + Write>(
    doc: &RcDoc<'_, Style>,
    width: usize,
    out: &mut W,
) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Pretty-printing conveniences for a [`Pack`]'s introspection.
pub trait PrettyIntrospection {
    /// Build an RcDoc of the introspection report with style annotations.
    fn pretty_doc(&self, options: &RenderOptions) -> RcDoc<'static, Style>;

    /// Render with colors to any termcolor writer, with the width and labels of `options`.
    fn pretty_render_to<W: WriteColor + Write>(
        &self,
        options: &RenderOptions,
        out: &mut W,
    ) -> io::Result<()>;

    /// Print to stdout with colors (TTY-aware) according to `options`.
    fn pretty_print_with(&self, options: &RenderOptions) -> io::Result<()>;

    /// Print to stdout with default options.
    fn pretty_print(&self) -> io::Result<()> {
        self.pretty_print_with(&RenderOptions::default())
    }

    /// Format into a plain string (no colors) at width 80.
    fn pretty_string(&self) -> String;
}

impl PrettyIntrospection for Pack {
    #[inline]
    fn pretty_doc(&self, options: &RenderOptions) -> RcDoc<'static, Style> {
        to_doc(self, options)
    }

    fn pretty_render_to<W: WriteColor + Write>(
        &self,
        options: &RenderOptions,
        out: &mut W,
    ) -> io::Result<()> {
        let doc = self.pretty_doc(options);
        render_to(&doc, options.resolved_width(), out)
    }

    fn pretty_print_with(&self, options: &RenderOptions) -> io::Result<()> {
        let stdout = StandardStream::stdout(options.color);
        let mut stdout = stdout.lock();
        self.pretty_render_to(options, &mut stdout)
    }

    fn pretty_string(&self) -> String {
        let mut buf = String::new();
        // Writing into a `String` never fails.
        let _ = self
            .pretty_doc(&RenderOptions::default())
            .render_fmt(80, &mut buf);
        buf
    }
}

impl std::fmt::Display for Pack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut w = pretty::FmtWrite::new(f);
        self.pretty_doc(&RenderOptions::default())
            .render_raw(80, &mut w)
    }
}
