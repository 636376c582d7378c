//! Indented pre-order tree dump
//!
//! Each node prints as `kind` or `kind: payload` on its own line, indented
//! by its depth. A node is followed by its primary chain and its secondary
//! chain one level deeper, then by its successor chain at its own depth, so
//! a function's statements line up with the function itself:
//!
//! ```text
//! function: add
//!   type: int
//!   param: a
//!     type: int
//! return
//!   binary-op: +
//!     id: a
//!     number: 1
//! ```
//!
//! Rendering only reads the tree; the same tree always renders to the same
//! text.

use super::{visit_pre_order, NodeRef};
use crate::parser::ast::Program;
use std::fmt;
use std::io;

const SPACES: &str = "                                ";

/// Dump layout options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    /// Spaces per depth level
    pub indent_width: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

/// Dump with the default layout
pub fn render(program: &Program) -> String {
    render_with(program, &PrintOptions::default())
}

pub fn render_with(program: &Program, options: &PrintOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = format_tree(&mut out, program, options);
    out
}

/// Stream the dump to `out` line by line, then flush it
pub fn write_tree<W: io::Write>(
    out: &mut W,
    program: &Program,
    options: &PrintOptions,
) -> io::Result<()> {
    let mut adapter = IoAdapter {
        inner: &mut *out,
        error: None,
    };
    if format_tree(&mut adapter, program, options).is_err() {
        return Err(adapter
            .error
            .take()
            .unwrap_or_else(|| io::Error::other("formatting failed")));
    }
    out.flush()
}

/// `fmt::Write` over an `io::Write`, keeping the first I/O error
struct IoAdapter<'w, W> {
    inner: &'w mut W,
    error: Option<io::Error>,
}

impl<W: io::Write> fmt::Write for IoAdapter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|err| {
            self.error = Some(err);
            fmt::Error
        })
    }
}

fn format_tree(out: &mut dyn fmt::Write, program: &Program, options: &PrintOptions) -> fmt::Result {
    let mut result = Ok(());
    visit_pre_order(program, |node, depth| {
        if result.is_ok() {
            result = write_line(out, node, depth.saturating_mul(options.indent_width));
        }
    });
    result
}

fn write_line(out: &mut dyn fmt::Write, node: NodeRef<'_>, indent: usize) -> fmt::Result {
    write_indent(out, indent)?;
    write!(out, "{}", node.kind())?;
    if let Some(payload) = node.payload() {
        write!(out, ": {}", payload)?;
    }
    out.write_char('\n')
}

/// Any number of spaces; format widths stop at `u16::MAX`
fn write_indent(out: &mut dyn fmt::Write, mut width: usize) -> fmt::Result {
    while width > 0 {
        let chunk = width.min(SPACES.len());
        out.write_str(&SPACES[..chunk])?;
        width -= chunk;
    }
    Ok(())
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_tree(f, self, &PrintOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn parse_source(source: &str) -> Program {
        Parser::from_source(source)
            .and_then(|mut p| p.parse_program())
            .expect("Parsing failed")
    }

    #[test]
    fn test_function_dump() {
        let program = parse_source("int add(int a, int b) { return a + b; }");

        let expected = "\
function: add
  type: int
  param: a
    type: int
  param: b
    type: int
return
  binary-op: +
    id: a
    id: b
";
        assert_eq!(render(&program), expected);
    }

    #[test]
    fn test_if_else_dump() {
        let program = parse_source("void f() { if (x) { y = 1; } else { y = 2; } }");

        let expected = "\
function: f
  type: void
if-else
  id: x
  if-body
    assignment: y
      number: 1
    assignment: y
      number: 2
";
        assert_eq!(render(&program), expected);
    }

    #[test]
    fn test_declaration_and_while_dump() {
        let program = parse_source("char g() { int n = 3; while (n) { n = n - 1; } return; }");

        let expected = "\
function: g
  type: char
declaration: n
  type: int
  number: 3
while
  id: n
  assignment: n
    binary-op: -
      id: n
      number: 1
return
";
        assert_eq!(render(&program), expected);
    }

    #[test]
    fn test_functions_print_as_siblings() {
        let program = parse_source("int a() { return 1; } int b() { return 2; }");

        let expected = "\
function: a
  type: int
return
  number: 1
function: b
  type: int
return
  number: 2
";
        assert_eq!(program.to_string(), expected);
    }

    #[test]
    fn test_indent_width() {
        let program = parse_source("int f() { return (1); }");
        let options = PrintOptions { indent_width: 4 };

        assert_eq!(
            render_with(&program, &options),
            "function: f\n    type: int\nreturn\n    number: 1\n"
        );
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let program = parse_source("int f(int x) { if (x) { return x * 2; } return 0; }");

        let first = render(&program);
        let second = render(&program);
        assert_eq!(first, second);
        assert_eq!(program.to_string(), first);

        let mut bytes = Vec::new();
        write_tree(&mut bytes, &program, &PrintOptions::default()).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), first);
    }

    #[test]
    fn test_wide_indent() {
        let program = parse_source("int f() { return 1; }");
        let options = PrintOptions {
            indent_width: 70_000,
        };

        let dump = render_with(&program, &options);
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "function: f");
        assert_eq!(lines[1].len(), 70_000 + "type: int".len());
        assert!(lines[1].starts_with(' '));
        assert!(lines[1].ends_with("type: int"));
        assert_eq!(lines[2], "return");
        assert_eq!(lines[3].trim_start(), "number: 1");
    }

    #[test]
    fn test_write_tree_reports_io_errors() {
        struct Broken;

        impl io::Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let program = parse_source("int f() { return 1; }");
        let err = write_tree(&mut Broken, &program, &PrintOptions::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
