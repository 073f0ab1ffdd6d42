use glam::{ivec2, IVec2};

pub trait StrExt {
    fn is_capitalized(&self) -> bool;

    fn capitalize(&self) -> String;

    /// Non-whitespace chars of a text block with their positions.
    ///
    /// Leading blank lines and the common indentation are cut off, so the
    /// topmost row is at y 0 and the leftmost column at x 0.
    fn char_grid(&self) -> impl Iterator<Item = (IVec2, char)> + '_;

    /// Expand `[token]` segments with `mapper`.
    ///
    /// `[[` and `]]` stand for literal brackets. A capitalized token gets
    /// passed to the mapper in lowercase and the mapped text is capitalized.
    /// An unclosed `[` is kept as is.
    ///
    /// ```
    /// use util::StrExt;
    ///
    /// let shout = |w: &str| -> Result<String, ()> {
    ///     if w == "foo" { Ok("bar".into()) } else { Err(()) }
    /// };
    ///
    /// assert_eq!("a [foo] b".templatize(shout), Ok("a bar b".into()));
    /// assert_eq!("[Foo]!".templatize(shout), Ok("Bar!".into()));
    /// assert_eq!("[[foo]]".templatize(shout), Ok("[foo]".into()));
    /// assert_eq!("[baz]".templatize(shout), Err(()));
    /// ```
    fn templatize<F, E>(&self, mapper: F) -> Result<String, E>
    where
        F: FnMut(&str) -> Result<String, E>;
}

fn map_first(s: &str, f: impl Fn(char) -> String) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => f(c) + chars.as_str(),
        None => String::new(),
    }
}

impl StrExt for str {
    fn is_capitalized(&self) -> bool {
        self.chars().next().is_some_and(char::is_uppercase)
    }

    fn capitalize(&self) -> String {
        map_first(self, |c| c.to_uppercase().collect())
    }

    fn char_grid(&self) -> impl Iterator<Item = (IVec2, char)> + '_ {
        fn is_blank(line: &str) -> bool {
            line.trim().is_empty()
        }

        let left = self
            .lines()
            .filter(|line| !is_blank(line))
            .map(|line| line.len() - line.trim_start().len())
            .min()
            .unwrap_or(0);

        self.lines()
            .skip_while(|line| is_blank(line))
            .zip(0..)
            .flat_map(move |(line, y)| {
                line.chars()
                    .skip(left)
                    .zip(0..)
                    .filter(|(c, _)| !c.is_whitespace())
                    .map(move |(c, x)| (ivec2(x, y), c))
            })
    }

    fn templatize<F, E>(&self, mut mapper: F) -> Result<String, E>
    where
        F: FnMut(&str) -> Result<String, E>,
    {
        let mut ret = String::with_capacity(self.len());
        let mut rest = self;

        while let Some(i) = rest.find(['[', ']']) {
            ret.push_str(&rest[..i]);
            let bracket = &rest[i..i + 1];
            rest = &rest[i + 1..];

            if let Some(tail) = rest.strip_prefix(bracket) {
                ret.push_str(bracket);
                rest = tail;
                continue;
            }
            if bracket == "]" {
                // Stray closing bracket.
                ret.push(']');
                continue;
            }

            let Some(end) = rest.find(']') else {
                ret.push('[');
                break;
            };
            let token = &rest[..end];
            rest = &rest[end + 1..];

            if token.is_capitalized() {
                let lower = map_first(token, |c| c.to_lowercase().collect());
                ret.push_str(&mapper(&lower)?.capitalize());
            } else {
                ret.push_str(&mapper(token)?);
            }
        }
        ret.push_str(rest);

        Ok(ret)
    }
}

pub trait CharExt {
    fn is_vowel(&self) -> bool;
}

impl CharExt for char {
    fn is_vowel(&self) -> bool {
        matches!(self.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitals() {
        assert_eq!("".capitalize(), "");
        assert_eq!("orc".capitalize(), "Orc");
        assert_eq!("Orc".capitalize(), "Orc");
        assert_eq!("ærø".capitalize(), "Ærø");
        assert!("You".is_capitalized());
        assert!(!"you".is_capitalized());
        assert!(!"".is_capitalized());
    }

    #[test]
    fn map_grid() {
        let grid: Vec<_> = "

            #.
              @"
        .char_grid()
        .collect();
        assert_eq!(
            grid,
            vec![(ivec2(0, 0), '#'), (ivec2(1, 0), '.'), (ivec2(2, 1), '@')]
        );
        assert_eq!("".char_grid().count(), 0);
        assert_eq!(
            "a\n\nb".char_grid().collect::<Vec<_>>(),
            vec![(ivec2(0, 0), 'a'), (ivec2(0, 2), 'b')]
        );
    }

    #[test]
    fn templates() {
        let echo = |w: &str| Ok::<_, ()>(format!("<{w}>"));
        assert_eq!("plain".templatize(echo), Ok("plain".into()));
        assert_eq!("[One] hit".templatize(echo), Ok("<one> hit".into()));
        assert_eq!("x [a][b] y".templatize(echo), Ok("x <a><b> y".into()));
        assert_eq!("[[a]] ]".templatize(echo), Ok("[a] ]".into()));
        assert_eq!("open [end".templatize(echo), Ok("open [end".into()));
    }

    #[test]
    fn vowels() {
        assert!('a'.is_vowel());
        assert!('O'.is_vowel());
        assert!(!'r'.is_vowel());
    }
}
