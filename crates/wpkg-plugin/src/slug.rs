//! Identifier-safe slugs.

/// Converts arbitrary text into a lowercase, dash-separated slug.
///
/// Rules, applied per character after lowercasing:
/// - ASCII letters and digits are kept
/// - accented Latin letters are folded to ASCII (`é` to `e`, `ß` to `ss`)
/// - whitespace, `.`, `_`, `-` and `/` separate words
/// - everything else is dropped
///
/// Consecutive separators collapse into a single `-` and the result never
/// starts or ends with one. Input with no ASCII letters or digits yields an
/// empty string.
///
/// # Examples
///
/// ```
/// use wpkg_plugin::to_slug;
///
/// assert_eq!(to_slug("My Plugin"), "my-plugin");
/// assert_eq!(to_slug("Don't Panic!"), "dont-panic");
/// assert_eq!(to_slug("__hello__world__"), "hello-world");
/// assert_eq!(to_slug("Café Crème"), "cafe-creme");
/// ```
#[must_use]
pub fn to_slug(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_dash = false;

    for c in raw.chars().flat_map(char::to_lowercase) {
        let folded = fold_accent(c);
        if c.is_ascii_alphanumeric() || folded.is_some() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            match folded {
                Some(folded) => slug.push_str(folded),
                None => slug.push(c),
            }
        } else if c.is_whitespace() || matches!(c, '.' | '_' | '-' | '/') {
            pending_dash = true;
        }
    }

    slug
}

/// ASCII spelling of a lowercase accented Latin letter.
const fn fold_accent(c: char) -> Option<&'static str> {
    let folded = match c {
        'à'..='å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ð' | 'ď' | 'đ' => "d",
        'è'..='ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' => "h",
        'ì'..='ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ò'..='ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'œ' => "oe",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ß' => "ss",
        'ţ' | 'ť' | 'ŧ' => "t",
        'þ' => "th",
        'ù'..='ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_slug_already_clean() {
        assert_eq!(to_slug("akismet"), "akismet");
        assert_eq!(to_slug("hello-dolly"), "hello-dolly");
        assert_eq!(to_slug("wp-2fa"), "wp-2fa");
    }

    #[test]
    fn test_to_slug_lowercases() {
        assert_eq!(to_slug("WooCommerce"), "woocommerce");
        assert_eq!(to_slug("ACF PRO"), "acf-pro");
    }

    #[test]
    fn test_to_slug_separators_collapse() {
        assert_eq!(to_slug("my  plugin"), "my-plugin");
        assert_eq!(to_slug("my_plugin.v2"), "my-plugin-v2");
        assert_eq!(to_slug("a - b"), "a-b");
        assert_eq!(to_slug("a/b"), "a-b");
    }

    #[test]
    fn test_to_slug_trims_edges() {
        assert_eq!(to_slug("  padded  "), "padded");
        assert_eq!(to_slug("--x--"), "x");
        assert_eq!(to_slug(".hidden"), "hidden");
    }

    #[test]
    fn test_to_slug_drops_disallowed() {
        assert_eq!(to_slug("Don't"), "dont");
        assert_eq!(to_slug("50% off!"), "50-off");
        assert_eq!(to_slug("(beta)"), "beta");
    }

    #[test]
    fn test_to_slug_folds_accents() {
        assert_eq!(to_slug("café"), "cafe");
        assert_eq!(to_slug("CAFÉ"), "cafe");
        assert_eq!(to_slug("Größe"), "grosse");
        assert_eq!(to_slug("Ærø Œuvre"), "aero-oeuvre");
        assert_eq!(to_slug("Żółć"), "zolc");
        assert_eq!(to_slug("señor_piñata"), "senor-pinata");
    }

    #[test]
    fn test_to_slug_drops_unfoldable_letters() {
        assert_eq!(to_slug("Ωmega"), "mega");
        assert_eq!(to_slug("naïve™"), "naive");
    }

    #[test]
    fn test_to_slug_empty_results() {
        assert_eq!(to_slug(""), "");
        assert_eq!(to_slug("---"), "");
        assert_eq!(to_slug("日本語"), "");
    }

    #[test]
    fn test_to_slug_is_idempotent() {
        for raw in ["My Plugin", "x__y", "Hello, World!", "  a.b.c  "] {
            let once = to_slug(raw);
            assert_eq!(to_slug(&once), once);
        }
    }
}
