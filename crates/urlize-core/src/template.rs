//! Block-level whitespace cleanup for rendered log markup.
//!
//! Templates may wrap any region in `{% whitelineless %}` /
//! `{% endwhitelineless %}`. The region is rendered first, then every line is
//! trimmed and blank lines are dropped. Blocks nest.

use once_cell::sync::Lazy;
use regex::Regex;
use std::mem;

use crate::error::TemplateError;

const OPEN_TAG: &str = "whitelineless";
const CLOSE_TAG: &str = "endwhitelineless";

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{%\s*(whitelineless|endwhitelineless)\s*%\}").expect("static pattern compiles")
});

const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}',
    '\u{2029}',
];

/// Trims every line, drops the blank ones and joins the rest with `\n`.
pub fn strip_empty_lines(block: &str) -> String {
    block
        .split(LINE_BREAKS)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

pub trait Node {
    fn render(&self, out: &mut String);
}

pub struct TextNode(String);

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl Node for TextNode {
    fn render(&self, out: &mut String) {
        out.push_str(&self.0);
    }
}

/// Renders its children, then normalizes the result with [`strip_empty_lines`].
pub struct WhiteLineless {
    nodelist: Vec<Box<dyn Node>>,
}

impl WhiteLineless {
    pub fn new(nodelist: Vec<Box<dyn Node>>) -> Self {
        Self { nodelist }
    }
}

impl Node for WhiteLineless {
    fn render(&self, out: &mut String) {
        let mut inner = String::new();
        for node in &self.nodelist {
            node.render(&mut inner);
        }
        out.push_str(&strip_empty_lines(&inner));
    }
}

pub struct Template {
    nodes: Vec<Box<dyn Node>>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut stack: Vec<(usize, Vec<Box<dyn Node>>)> = Vec::new();
        let mut current: Vec<Box<dyn Node>> = Vec::new();
        let mut last = 0;

        for caps in TAG.captures_iter(source) {
            let (Some(tag), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            push_text(&mut current, &source[last..tag.start()]);
            last = tag.end();

            if name.as_str() == OPEN_TAG {
                stack.push((tag.start(), mem::take(&mut current)));
                continue;
            }
            let Some((_, parent)) = stack.pop() else {
                return Err(TemplateError::UnexpectedEnd {
                    tag: CLOSE_TAG,
                    offset: tag.start(),
                });
            };
            let body = mem::replace(&mut current, parent);
            current.push(Box::new(WhiteLineless::new(body)));
        }
        push_text(&mut current, &source[last..]);

        if let Some((offset, _)) = stack.pop() {
            return Err(TemplateError::Unclosed {
                tag: OPEN_TAG,
                offset,
            });
        }
        Ok(Self { nodes: current })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.render(&mut out);
        }
        out
    }
}

fn push_text(nodes: &mut Vec<Box<dyn Node>>, text: &str) {
    if !text.is_empty() {
        nodes.push(Box::new(TextNode::new(text)));
    }
}

/// Parses and renders `source` in one go.
pub fn whitelineless(source: &str) -> Result<String, TemplateError> {
    Ok(Template::parse(source)?.render())
}
