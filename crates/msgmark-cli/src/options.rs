use anyhow::{Context, Result};
use msgmark_config::{Config, FormattingConfig, LayoutConfig};
use msgmark_engine::{Color, FormatOptions, Highlight, Layout, ParseLimits};

fn parse_color(field: &str, value: &str) -> Result<Color> {
    value
        .parse()
        .with_context(|| format!("invalid colour for formatting.{field}"))
}

pub fn highlight(formatting: &FormattingConfig) -> Result<Highlight> {
    if formatting.highlight_disabled() {
        return Ok(Highlight::None);
    }
    Ok(Highlight::Color(parse_color(
        "highlight",
        &formatting.highlight,
    )?))
}

fn layout(config: &LayoutConfig) -> Layout {
    Layout {
        list_indent_step: config.list_indent_step,
        list_indent_base: config.list_indent_base,
        list_rest_extra: config.list_rest_extra,
        ordered_indent_step: config.ordered_indent_step,
        ordered_indent_base: config.ordered_indent_base,
        ordered_rest_extra: config.ordered_rest_extra,
        quote_indent: config.quote_indent,
        heading_line_heights: config.heading_line_heights,
        default_line_height: config.default_line_height,
    }
}

/// Engine options and edit-mode highlight for a loaded config.
pub fn from_config(config: &Config) -> Result<(FormatOptions, Highlight)> {
    let formatting = &config.formatting;
    let options = FormatOptions {
        bullet: formatting.bullet.clone(),
        quote_glyph: formatting.quote_glyph.clone(),
        mention_color: parse_color("mention_color", &formatting.mention_color)?,
        code_background: parse_color("code_background", &formatting.code_background)?,
        layout: layout(&config.layout),
        limits: ParseLimits {
            max_input_len: formatting.max_input_len,
            ..ParseLimits::default()
        },
    };
    Ok((options, highlight(formatting)?))
}
