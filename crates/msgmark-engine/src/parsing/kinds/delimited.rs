/// Paired inline delimiters: emphasis, strong, strikethrough and code spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimited {
    Emphasis,
    Strong,
    Strikethrough,
    Code,
}

impl Delimited {
    pub const TILDE: u8 = b'~';

    /// Width of the delimiter on each side of `source`, the full text of the
    /// construct. Strikethrough accepts `~x~` and `~~x~~`.
    pub fn width(self, source: &str) -> usize {
        match self {
            Delimited::Emphasis | Delimited::Code => 1,
            Delimited::Strong => 2,
            Delimited::Strikethrough => source
                .bytes()
                .take_while(|&b| b == Self::TILDE)
                .count()
                .clamp(1, 2),
        }
    }

    /// The literal inserted on each side when wrapping a selection.
    pub fn literal(self) -> &'static str {
        match self {
            Delimited::Emphasis => "*",
            Delimited::Strong => "**",
            Delimited::Strikethrough => "~~",
            Delimited::Code => "`",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_widths() {
        assert_eq!(Delimited::Emphasis.width("*a*"), 1);
        assert_eq!(Delimited::Strong.width("**a**"), 2);
        assert_eq!(Delimited::Code.width("`a`"), 1);
    }

    #[test]
    fn strikethrough_width_follows_tilde_run() {
        assert_eq!(Delimited::Strikethrough.width("~a~"), 1);
        assert_eq!(Delimited::Strikethrough.width("~~a~~"), 2);
        assert_eq!(Delimited::Strikethrough.width("~~~a~~~"), 2);
    }
}
