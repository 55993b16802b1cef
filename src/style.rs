//! Foreground color lookup from an inline `style` attribute.

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses the exact `#RRGGBB` form. Anything else is `None`.
    pub fn from_hex(code: &str) -> Option<Self> {
        let hex = code.strip_prefix('#')?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Upper-case `RRGGBB`, the form WordprocessingML expects in `w:color`.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Resolves the foreground color declared in an inline style.
///
/// Declarations are split on `;`. Every segment containing the literal
/// `color:` overrides the previous one, so the last wins even when it is
/// not a valid `#RRGGBB`. The value is what follows the last `:` of the
/// segment, trimmed.
pub fn resolve_color(style: Option<&str>) -> Option<Rgb> {
    let style = style?;
    let mut color = None;
    for decl in style.split(';') {
        if !decl.contains("color:") {
            continue;
        }
        let value = decl.rsplit(':').next().unwrap_or_default().trim();
        color = Rgb::from_hex(value);
    }
    color
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_hex_declaration() {
        assert_eq!(resolve_color(Some("color:#FF0000")), Some(Rgb(255, 0, 0)));
        assert_eq!(
            resolve_color(Some("font-weight: bold; color: #1a2B3c ;")),
            Some(Rgb(0x1a, 0x2b, 0x3c))
        );
    }

    #[test]
    fn last_declaration_wins() {
        assert_eq!(
            resolve_color(Some("color:#000000;color:#00FF00")),
            Some(Rgb(0, 255, 0))
        );
        assert_eq!(resolve_color(Some("color:#00FF00;color:red")), None);
    }

    #[test]
    fn unsupported_forms_resolve_to_none() {
        assert_eq!(resolve_color(None), None);
        assert_eq!(resolve_color(Some("")), None);
        assert_eq!(resolve_color(Some("color: red")), None);
        assert_eq!(resolve_color(Some("color: rgb(1, 2, 3)")), None);
        assert_eq!(resolve_color(Some("color: #abc")), None);
        assert_eq!(resolve_color(Some("color: #GGHHII")), None);
        assert_eq!(resolve_color(Some("color: #ééé")), None);
    }

    #[test]
    fn property_match_is_case_sensitive() {
        assert_eq!(resolve_color(Some("COLOR:#FF0000")), None);
    }

    #[test]
    fn background_color_also_matches_literal_token() {
        // `background-color:` contains `color:` as well.
        assert_eq!(
            resolve_color(Some("color:#FF0000; background-color:#0000FF")),
            Some(Rgb(0, 0, 255))
        );
    }

    #[test]
    fn hex_output_is_upper_case() {
        assert_eq!(Rgb(0x1a, 0x2b, 0x3c).to_hex(), "1A2B3C");
    }

    /// Declarations that never mention a color.
    fn other_decl() -> impl Strategy<Value = String> {
        "[a-z-]{1,12}: ?[a-z0-9 ]{0,8}".prop_filter("no color property", |d| !d.contains("color"))
    }

    fn rejected_value() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::sample::select(vec!["red", "blue", "black", "transparent", "inherit"])
                .prop_map(str::to_string),
            "#[0-9a-fA-F]{3}",
            "#[0-9a-fA-F]{4,5}",
            "#[0-9a-fA-F]{7,8}",
            "#[g-zG-Z]{6}",
            (any::<u8>(), any::<u8>(), any::<u8>())
                .prop_map(|(r, g, b)| format!("rgb({r}, {g}, {b})")),
        ]
    }

    proptest! {
        #[test]
        fn prop_single_hex_color_is_exact(
            (r, g, b) in (any::<u8>(), any::<u8>(), any::<u8>()),
            before in prop::collection::vec(other_decl(), 0..4),
            after in prop::collection::vec(other_decl(), 0..4),
            lower in any::<bool>(),
        ) {
            let hex = if lower {
                format!("#{r:02x}{g:02x}{b:02x}")
            } else {
                format!("#{r:02X}{g:02X}{b:02X}")
            };
            let mut decls = before;
            decls.push(format!("color: {hex}"));
            decls.extend(after);
            let style = decls.join(";");
            prop_assert_eq!(resolve_color(Some(style.as_str())), Some(Rgb(r, g, b)));
        }

        #[test]
        fn prop_last_color_declaration_wins(
            colors in prop::collection::vec((any::<u8>(), any::<u8>(), any::<u8>()), 2..5),
            filler in other_decl(),
        ) {
            let style = colors
                .iter()
                .map(|(r, g, b)| format!("color:#{r:02X}{g:02X}{b:02X}; {filler}"))
                .collect::<Vec<_>>()
                .join(";");
            let &(r, g, b) = colors.last().unwrap();
            prop_assert_eq!(resolve_color(Some(style.as_str())), Some(Rgb(r, g, b)));
        }

        #[test]
        fn prop_non_hex_colors_resolve_to_none(
            value in rejected_value(),
            filler in other_decl(),
        ) {
            let style = format!("{filler}; color: {value}");
            prop_assert_eq!(resolve_color(Some(style.as_str())), None);
        }

        #[test]
        fn prop_styles_without_color_resolve_to_none(
            decls in prop::collection::vec(other_decl(), 0..5),
        ) {
            prop_assert_eq!(resolve_color(Some(decls.join(";").as_str())), None);
        }
    }
}
