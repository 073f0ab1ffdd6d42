//! English noun and verb agreement for templated game messages.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::{CharExt, StrExt};

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum Noun {
    You,
    He(String),
    She(String),
    It(String),
    Plural(String),
}

use Noun::*;

impl Noun {
    pub fn third_person_singular(&self) -> bool {
        matches!(self, He(_) | She(_) | It(_))
    }

    pub fn is_you(&self) -> bool {
        matches!(self, You)
    }

    pub fn name(&self) -> &str {
        match self {
            You => "you",
            He(n) | She(n) | It(n) | Plural(n) => n,
        }
    }

    pub fn is_proper_noun(&self) -> bool {
        self.name().is_capitalized()
    }

    pub fn the_name(&self) -> String {
        if self.is_you() {
            "you".into()
        } else if self.is_proper_noun() {
            self.name().into()
        } else {
            format!("the {}", self.name())
        }
    }

    pub fn a_name(&self) -> String {
        if self.is_you() {
            "you".into()
        } else if self.is_proper_noun() || matches!(self, Plural(_)) {
            self.name().into()
        } else {
            let article =
                if self.name().chars().next().is_some_and(|c| c.is_vowel()) {
                    "an"
                } else {
                    "a"
                };
            format!("{article} {}", self.name())
        }
    }

    pub fn they(&self) -> &str {
        match self {
            You => "you",
            He(_) => "he",
            She(_) => "she",
            It(_) => "it",
            Plural(_) => "they",
        }
    }

    pub fn them(&self) -> &str {
        match self {
            You => "you",
            He(_) => "him",
            She(_) => "her",
            It(_) => "it",
            Plural(_) => "them",
        }
    }

    pub fn their(&self) -> &str {
        match self {
            You => "your",
            He(_) => "his",
            She(_) => "her",
            It(_) => "its",
            Plural(_) => "their",
        }
    }

    pub fn possessive(&self) -> String {
        match self {
            You => "your".into(),
            n => format!("{}'s", n.the_name()),
        }
    }

    pub fn themselves(&self) -> &str {
        match self {
            You => "yourself",
            He(_) => "himself",
            She(_) => "herself",
            It(_) => "itself",
            Plural(_) => "themselves",
        }
    }

    /// Expand a subject-only template token.
    pub fn convert(&self, token: &str) -> Result<String> {
        let singular = self.third_person_singular();
        let ret = match token {
            "some" => self.a_name(),
            "one" => self.the_name(),
            "one's" => self.their().into(),
            "oneself" => self.themselves().into(),
            "they" => self.they().into(),

            // Verb endings, all of these agree with the subject.
            // hit/hits
            "s" => if singular { "s" } else { "" }.into(),
            // slash/slashes
            "es" => if singular { "es" } else { "" }.into(),
            // parry/parries
            "ies" => if singular { "ies" } else { "y" }.into(),
            "is" | "are" => if singular { "is" } else { "are" }.into(),
            "has" | "have" => if singular { "has" } else { "have" }.into(),

            _ => bail!("bad token {token:?}"),
        };
        Ok(ret)
    }
}

/// Subject and object pair for templating two-party messages.
pub struct Sentence<'a> {
    subject: &'a Noun,
    object: &'a Noun,
}

impl<'a> Sentence<'a> {
    pub fn new(subject: &'a Noun, object: &'a Noun) -> Sentence<'a> {
        Sentence { subject, object }
    }

    pub fn convert(&self, token: &str) -> Result<String> {
        let ret = match token {
            "another" => self.object.the_name(),
            "a thing" => self.object.a_name(),
            "another's" => self.object.possessive(),
            "their" => self.object.their().into(),
            "them" => self.object.them().into(),

            _ => {
                return self.subject.convert(token);
            }
        };
        Ok(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_noun(name: &str) -> Noun {
        match name {
            "PLAYER" => You,
            "Gorbag" => He("Gorbag".into()),
            "Shelob" => She("Shelob".into()),
            "2 bats" => Plural("2 bats".into()),
            thing => It(thing.into()),
        }
    }

    #[test]
    fn subject_templates() {
        for (subject, template, message) in [
            ("PLAYER", "[One] bleed[s].", "You bleed."),
            ("orc", "[One] bleed[s].", "The orc bleeds."),
            ("PLAYER", "[One] lurch[es] forward.", "You lurch forward."),
            ("rat", "[One] lurch[es] forward.", "The rat lurches forward."),
            ("Gorbag", "[One] [is] stunned.", "Gorbag is stunned."),
            ("PLAYER", "[One] [is] stunned.", "You are stunned."),
            ("orc", "[One] parr[ies] the blow.", "The orc parries the blow."),
            ("2 bats", "[One] [have] [one's] fill.", "The 2 bats have their fill."),
        ] {
            let t = make_noun(subject);
            assert_eq!(template.templatize(|e| t.convert(e)).unwrap(), message);
        }
    }

    #[test]
    fn object_templates() {
        for (subject, object, template, message) in [
            ("PLAYER", "orc", "[One] hit[s] [another].", "You hit the orc."),
            ("orc", "PLAYER", "[One] hit[s] [another].", "The orc hits you."),
            (
                "Shelob",
                "PLAYER",
                "[One] sink[s] [one's] fangs into [another's] leg.",
                "Shelob sinks her fangs into your leg.",
            ),
            (
                "PLAYER",
                "Gorbag",
                "[One] knock[s] [them] off [their] feet.",
                "You knock him off his feet.",
            ),
            ("PLAYER", "axe", "[One] see[s] [a thing] here.", "You see an axe here."),
        ] {
            let a = make_noun(subject);
            let b = make_noun(object);
            assert_eq!(
                template
                    .templatize(|e| Sentence::new(&a, &b).convert(e))
                    .unwrap(),
                message
            );
        }
    }

    #[test]
    fn unknown_token() {
        assert!("[One] [frob]".templatize(|e| You.convert(e)).is_err());
    }
}
