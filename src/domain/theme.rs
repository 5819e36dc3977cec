use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::UnknownTheme;

macro_rules! theme_names {
    ($($(#[$attr:meta])* $variant:ident => $name:literal, $label:literal;)+) => {
        /// A named visual theme. The wire name is what gets persisted and what
        /// the web client reads back, so variants must never be renamed.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
        #[serde(rename_all = "lowercase")]
        pub enum ThemeName {
            $(
                #[doc = $label]
                $(#[$attr])*
                $variant,
            )+
        }

        impl ThemeName {
            const ALL: &'static [ThemeName] = &[$(ThemeName::$variant,)+];

            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(ThemeName::$variant => $name,)+
                }
            }

            #[must_use]
            pub fn label(&self) -> &'static str {
                match self {
                    $(ThemeName::$variant => $label,)+
                }
            }
        }
    };
}

theme_names! {
    Light => "light", "Light";
    Dark => "dark", "Dark";
    Cupcake => "cupcake", "Cupcake";
    Bumblebee => "bumblebee", "Bumblebee";
    Emerald => "emerald", "Emerald";
    Corporate => "corporate", "Corporate";
    Synthwave => "synthwave", "Synthwave";
    Retro => "retro", "Retro";
    Cyberpunk => "cyberpunk", "Cyberpunk";
    Valentine => "valentine", "Valentine";
    Halloween => "halloween", "Halloween";
    Garden => "garden", "Garden";
    Forest => "forest", "Forest";
    Aqua => "aqua", "Aqua";
    Lofi => "lofi", "Lo-Fi";
    Pastel => "pastel", "Pastel";
    Fantasy => "fantasy", "Fantasy";
    Wireframe => "wireframe", "Wireframe";
    Black => "black", "Black";
    Luxury => "luxury", "Luxury";
    Dracula => "dracula", "Dracula";
    Cmyk => "cmyk", "CMYK";
    Autumn => "autumn", "Autumn";
    Business => "business", "Business";
    Acid => "acid", "Acid";
    Lemonade => "lemonade", "Lemonade";
    Night => "night", "Night";
    #[default]
    Coffee => "coffee", "Coffee";
    Winter => "winter", "Winter";
    Dim => "dim", "Dim";
    Nord => "nord", "Nord";
    Sunset => "sunset", "Sunset";
}

impl ThemeName {
    #[must_use]
    pub fn all() -> &'static [ThemeName] {
        Self::ALL
    }

    /// Whether the theme renders with a dark color scheme.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        matches!(
            self,
            ThemeName::Dark
                | ThemeName::Synthwave
                | ThemeName::Halloween
                | ThemeName::Forest
                | ThemeName::Aqua
                | ThemeName::Black
                | ThemeName::Luxury
                | ThemeName::Dracula
                | ThemeName::Business
                | ThemeName::Night
                | ThemeName::Coffee
                | ThemeName::Dim
                | ThemeName::Sunset
        )
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_set_has_32_unique_names() {
        let all = ThemeName::all();
        assert_eq!(all.len(), 32);
        let names: std::collections::HashSet<_> = all.iter().map(ThemeName::as_str).collect();
        assert_eq!(names.len(), 32);
    }

    #[test]
    fn test_default_is_coffee() {
        assert_eq!(ThemeName::default(), ThemeName::Coffee);
        assert_eq!(ThemeName::default().as_str(), "coffee");
    }

    #[test]
    fn test_parse_every_wire_name() {
        for theme in ThemeName::all() {
            assert_eq!(theme.as_str().parse::<ThemeName>().unwrap(), *theme);
            assert_eq!(theme.to_string(), theme.as_str());
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_wrong_case() {
        assert_eq!(
            "solarized".parse::<ThemeName>(),
            Err(UnknownTheme("solarized".to_string()))
        );
        assert!("Dracula".parse::<ThemeName>().is_err());
        assert!("".parse::<ThemeName>().is_err());
        assert_eq!(" nord\n".parse::<ThemeName>().unwrap(), ThemeName::Nord);
    }

    #[test]
    fn test_serde_uses_wire_name() {
        #[derive(Serialize, Deserialize)]
        struct Doc {
            theme: ThemeName,
        }
        let text = toml::to_string(&Doc {
            theme: ThemeName::Cmyk,
        })
        .unwrap();
        assert_eq!(text.trim(), "theme = \"cmyk\"");
        let back: Doc = toml::from_str("theme = \"lofi\"").unwrap();
        assert_eq!(back.theme, ThemeName::Lofi);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ThemeName::Cmyk.label(), "CMYK");
        assert_eq!(ThemeName::Lofi.label(), "Lo-Fi");
        assert!(ThemeName::Coffee.is_dark());
        assert!(!ThemeName::Light.is_dark());
    }
}
