//! Identifier case conversion.
//!
//! Words are split on case changes so that acronyms stay together: `URLIsNotID` is
//! `URL`, `Is`, `Not`, `ID`.

#[derive(Clone, Copy, PartialEq)]
enum CharClass {
    Lower,
    Upper,
    Digit,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_lowercase() {
            CharClass::Lower
        } else if c.is_uppercase() {
            CharClass::Upper
        } else if c.is_numeric() {
            CharClass::Digit
        } else {
            CharClass::Other
        }
    }
}

/// Split an identifier into words. Characters other than letters and digits only separate words.
pub fn tokenize(identifier: &str) -> Vec<String> {
    let mut runs: Vec<(CharClass, String)> = Vec::new();

    for c in identifier.chars() {
        let class = CharClass::of(c);
        match runs.last_mut() {
            Some((last, run)) if *last == class => run.push(c),
            _ => runs.push((class, c.to_string())),
        }
    }

    // An uppercase run followed by lowercase letters gives away its last letter: `URLIs` is
    // `URL` and `Is`.
    for idx in 0..runs.len().saturating_sub(1) {
        if runs[idx].0 == CharClass::Upper && runs[idx + 1].0 == CharClass::Lower {
            if let Some(last) = runs[idx].1.pop() {
                runs[idx + 1].1.insert(0, last);
            }
        }
    }

    let mut tokens: Vec<String> = Vec::new();
    let mut previous = CharClass::Other;

    for (class, run) in runs {
        if run.is_empty() {
            continue;
        }

        match class {
            CharClass::Other => {
                previous = class;
                continue;
            }
            // Digits stick to the word they follow: `url123`.
            CharClass::Digit if previous != CharClass::Other => {
                if let Some(token) = tokens.last_mut() {
                    token.push_str(&run);
                } else {
                    tokens.push(run);
                }
            }
            _ => tokens.push(run),
        }

        previous = class;
    }

    tokens
}

/// `FooBarBaz` and `foo_bar_baz` both become `fooBarBaz`. Acronyms are lowered as one word.
pub fn to_lower_camel_case(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());

    for (idx, token) in tokenize(identifier).iter().enumerate() {
        let lower = token.to_lowercase();
        if idx == 0 {
            out.push_str(&lower);
            continue;
        }

        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}

pub fn to_snake_case(identifier: &str) -> String {
    tokenize(identifier)
        .iter()
        .map(|token| token.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}
