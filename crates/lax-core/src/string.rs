//! Text utilities: loose string conversion, `capitalize`, and the `words`
//! tokenizer.

use regex::Regex;

use crate::value::Value;

/// Loose string conversion.
///
/// Nullish values convert to the empty string, arrays to their
/// comma-joined element texts, numbers to their shortest decimal form
/// (`-0` prints as `0`, non-finite values as `Infinity` / `NaN`).
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Undefined | Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_text(*n),
        Value::String(s) => s.clone(),
        Value::Symbol(s) => format!("Symbol({})", s.description()),
        Value::Array(items) => items
            .iter()
            .map(to_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Map(_) => "[object Map]".to_string(),
        Value::Set(_) => "[object Set]".to_string(),
        Value::Function(_) => "function () { [native code] }".to_string(),
    }
}

fn number_to_text(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // -0 prints as plain 0
        return "0".to_string();
    }
    if n.abs() >= 1e21 {
        let exp = format!("{:e}", n);
        return match exp.split_once('e') {
            Some((mantissa, e)) if !e.starts_with('-') => format!("{mantissa}e+{e}"),
            _ => exp,
        };
    }
    format!("{n}")
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Split free text into word tokens.
///
/// With no pattern, tokens are letter runs (split at camelCase boundaries
/// and at the end of acronym runs), digit runs, and single emoji; any
/// script's letters qualify. Punctuation and whitespace separate tokens and
/// are dropped, except apostrophes inside contractions, which stay part of
/// the token. A caller pattern replaces the default tokenization entirely.
///
/// ```
/// use lax_core::words;
/// assert_eq!(words("camelCaseString", None), vec!["camel", "Case", "String"]);
/// assert_eq!(words("I'm here", None), vec!["I'm", "here"]);
/// ```
pub fn words(text: &str, pattern: Option<&Regex>) -> Vec<String> {
    match pattern {
        Some(re) => re.find_iter(text).map(|m| m.as_str().to_string()).collect(),
        None => tokenize(text),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CharKind {
    Upper,
    Lower,
    /// A caseless letter (CJK, etc.); joins runs like a lowercase letter.
    Letter,
    Digit,
    Emoji,
    Apostrophe,
    Other,
}

fn classify(c: char) -> CharKind {
    match c {
        '\'' | '\u{2019}' => CharKind::Apostrophe,
        '\u{2700}'..='\u{27BF}' | '\u{1F000}'..='\u{1FAFF}' => CharKind::Emoji,
        c if c.is_numeric() => CharKind::Digit,
        c if c.is_uppercase() => CharKind::Upper,
        c if c.is_lowercase() => CharKind::Lower,
        c if c.is_alphabetic() => CharKind::Letter,
        _ => CharKind::Other,
    }
}

fn is_word_kind(kind: CharKind) -> bool {
    matches!(
        kind,
        CharKind::Upper | CharKind::Lower | CharKind::Letter | CharKind::Digit
    )
}

fn tokenize(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut buf = String::new();
    // kinds of the last two characters pushed into buf
    let mut prev = CharKind::Other;
    let mut prev_prev = CharKind::Other;

    let flush = |buf: &mut String, tokens: &mut Vec<String>| {
        if !buf.is_empty() {
            tokens.push(std::mem::take(buf));
        }
    };

    for (i, &c) in chars.iter().enumerate() {
        let kind = classify(c);
        match kind {
            CharKind::Emoji => {
                flush(&mut buf, &mut tokens);
                tokens.push(c.to_string());
                prev = CharKind::Other;
            }
            CharKind::Apostrophe => {
                let letter = |k| matches!(k, CharKind::Upper | CharKind::Lower | CharKind::Letter);
                let next_is_letter = chars
                    .get(i + 1)
                    .map(|&n| letter(classify(n)))
                    .unwrap_or(false);
                if !buf.is_empty() && letter(prev) && next_is_letter {
                    buf.push(c);
                    prev_prev = prev;
                    prev = CharKind::Apostrophe;
                } else {
                    flush(&mut buf, &mut tokens);
                    prev = CharKind::Other;
                }
            }
            CharKind::Other => {
                flush(&mut buf, &mut tokens);
                prev = CharKind::Other;
            }
            _ => {
                let boundary = match (prev, kind) {
                    (p, _) if !is_word_kind(p) && p != CharKind::Apostrophe => false,
                    // digit runs and letter runs are distinct tokens
                    (CharKind::Digit, k) if k != CharKind::Digit => true,
                    (p, CharKind::Digit) if p != CharKind::Digit => true,
                    // camelCase: a new capital after a small letter
                    (CharKind::Lower | CharKind::Letter, CharKind::Upper) => true,
                    _ => false,
                };
                if boundary && !buf.is_empty() {
                    flush(&mut buf, &mut tokens);
                    prev = CharKind::Other;
                } else if kind == CharKind::Lower
                    && prev == CharKind::Upper
                    && prev_prev == CharKind::Upper
                {
                    // end of an acronym run: the last capital starts the
                    // next word ("FOOBar" -> "FOO", "Bar")
                    let last = buf.pop();
                    flush(&mut buf, &mut tokens);
                    if let Some(last) = last {
                        buf.push(last);
                    }
                }
                buf.push(c);
                prev_prev = prev;
                prev = kind;
            }
        }
    }
    flush(&mut buf, &mut tokens);
    tokens
}
