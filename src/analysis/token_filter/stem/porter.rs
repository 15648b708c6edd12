//! Porter stemming algorithm.
//!
//! Implements the five-step suffix stripping algorithm from M. F. Porter,
//! "An algorithm for suffix stripping" (1980), including the `bli`/`logi`
//! revisions of the reference implementation. Words of two letters or fewer
//! and non-ASCII words are returned lowercased but otherwise unchanged.
//!
//! # Examples
//!
//! ```
//! use falx::analysis::token_filter::stem::Stemmer;
//! use falx::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("caresses"), "caress");
//! assert_eq!(stemmer.stem("hopping"), "hop");
//! assert_eq!(stemmer.stem("relational"), "relat");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

const STEP2_SUFFIXES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3_SUFFIXES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Porter stemmer for English words.
#[derive(Debug, Clone, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let lowered = word.to_ascii_lowercase();
        if lowered.len() <= 2 || !lowered.is_ascii() {
            return lowered;
        }

        let mut word = Word::new(lowered.into_bytes());
        word.step1ab();
        if word.len() > 1 {
            word.step1c();
            word.step2();
            word.step3();
            word.step4();
            word.step5();
        }
        word.into_string()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

/// Working buffer for a single word.
///
/// `stem` is the length of the region a successful [`Word::ends`] left in
/// front of the matched suffix; measures and vowel checks apply to it.
struct Word {
    bytes: Vec<u8>,
    stem: usize,
}

impl Word {
    fn new(bytes: Vec<u8>) -> Self {
        let stem = bytes.len();
        Word { bytes, stem }
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn last(&self) -> u8 {
        self.bytes[self.bytes.len() - 1]
    }

    fn into_string(self) -> String {
        // Only ASCII bytes ever enter or get written to the buffer.
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    fn is_consonant(&self, i: usize) -> bool {
        match self.bytes[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in the stem region.
    fn measure(&self) -> usize {
        let mut count = 0;
        let mut in_vowels = false;

        for i in 0..self.stem {
            if self.is_consonant(i) {
                if in_vowels {
                    count += 1;
                }
                in_vowels = false;
            } else {
                in_vowels = true;
            }
        }

        count
    }

    fn vowel_in_stem(&self) -> bool {
        (0..self.stem).any(|i| !self.is_consonant(i))
    }

    fn double_consonant(&self, i: usize) -> bool {
        i >= 1 && self.bytes[i] == self.bytes[i - 1] && self.is_consonant(i)
    }

    /// Consonant-vowel-consonant ending at `i`, where the final consonant is
    /// not `w`, `x` or `y`.
    fn cvc(&self, i: usize) -> bool {
        i >= 2
            && self.is_consonant(i)
            && !self.is_consonant(i - 1)
            && self.is_consonant(i - 2)
            && !matches!(self.bytes[i], b'w' | b'x' | b'y')
    }

    fn ends(&mut self, suffix: &str) -> bool {
        if self.bytes.ends_with(suffix.as_bytes()) {
            self.stem = self.bytes.len() - suffix.len();
            true
        } else {
            false
        }
    }

    fn set_to(&mut self, replacement: &str) {
        self.bytes.truncate(self.stem);
        self.bytes.extend_from_slice(replacement.as_bytes());
    }

    fn replace_if_measured(&mut self, replacement: &str) {
        if self.measure() > 0 {
            self.set_to(replacement);
        }
    }

    /// Plurals and -ed / -ing.
    fn step1ab(&mut self) {
        if self.last() == b's' {
            if self.ends("sses") {
                self.bytes.truncate(self.len() - 2);
            } else if self.ends("ies") {
                self.set_to("i");
            } else if self.bytes[self.len() - 2] != b's' {
                self.bytes.pop();
            }
        }

        if self.ends("eed") {
            if self.measure() > 0 {
                self.bytes.pop();
            }
        } else if (self.ends("ed") || self.ends("ing")) && self.vowel_in_stem() {
            self.bytes.truncate(self.stem);
            if self.ends("at") {
                self.set_to("ate");
            } else if self.ends("bl") {
                self.set_to("ble");
            } else if self.ends("iz") {
                self.set_to("ize");
            } else if self.double_consonant(self.len() - 1) {
                if !matches!(self.last(), b'l' | b's' | b'z') {
                    self.bytes.pop();
                }
            } else {
                self.stem = self.len();
                if self.measure() == 1 && self.cvc(self.len() - 1) {
                    self.bytes.push(b'e');
                }
            }
        }
    }

    /// Terminal y to i when there is another vowel in the stem.
    fn step1c(&mut self) {
        if self.ends("y") && self.vowel_in_stem() {
            let last = self.len() - 1;
            self.bytes[last] = b'i';
        }
    }

    /// Double suffixes to single ones.
    fn step2(&mut self) {
        if let Some(&(_, replacement)) = STEP2_SUFFIXES.iter().find(|(suffix, _)| self.ends(suffix)) {
            self.replace_if_measured(replacement);
        }
    }

    /// -ic-, -full, -ness etc.
    fn step3(&mut self) {
        if let Some(&(_, replacement)) = STEP3_SUFFIXES.iter().find(|(suffix, _)| self.ends(suffix)) {
            self.replace_if_measured(replacement);
        }
    }

    /// Strips -ant, -ence etc. in context <c>vcvc<v>.
    fn step4(&mut self) {
        let matched = STEP4_SUFFIXES.iter().any(|suffix| {
            if !self.ends(suffix) {
                return false;
            }
            if *suffix == "ion" {
                self.stem > 0 && matches!(self.bytes[self.stem - 1], b's' | b't')
            } else {
                true
            }
        });

        if matched && self.measure() > 1 {
            self.bytes.truncate(self.stem);
        }
    }

    /// Removes a final -e and reduces -ll to -l when the measure allows it.
    fn step5(&mut self) {
        self.stem = self.len();
        let m = self.measure();

        if self.last() == b'e' && (m > 1 || (m == 1 && !self.cvc(self.len() - 2))) {
            self.bytes.pop();
        }

        let last = self.len() - 1;
        if self.last() == b'l' && self.double_consonant(last) && m > 1 {
            self.bytes.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem(word: &str) -> String {
        PorterStemmer::new().stem(word)
    }

    #[test]
    fn test_plurals() {
        assert_eq!(stem("caresses"), "caress");
        assert_eq!(stem("ponies"), "poni");
        assert_eq!(stem("ties"), "ti");
        assert_eq!(stem("caress"), "caress");
        assert_eq!(stem("cats"), "cat");
    }

    #[test]
    fn test_past_and_progressive() {
        assert_eq!(stem("feed"), "feed");
        assert_eq!(stem("agreed"), "agre");
        assert_eq!(stem("plastered"), "plaster");
        assert_eq!(stem("bled"), "bled");
        assert_eq!(stem("motoring"), "motor");
        assert_eq!(stem("sing"), "sing");
        assert_eq!(stem("hopping"), "hop");
        assert_eq!(stem("falling"), "fall");
        assert_eq!(stem("filing"), "file");
        assert_eq!(stem("sized"), "size");
        assert_eq!(stem("meeting"), "meet");
    }

    #[test]
    fn test_terminal_y() {
        assert_eq!(stem("happy"), "happi");
        assert_eq!(stem("sky"), "sky");
    }

    #[test]
    fn test_longer_suffixes() {
        assert_eq!(stem("relational"), "relat");
        assert_eq!(stem("generalization"), "gener");
        assert_eq!(stem("adoption"), "adopt");
    }

    #[test]
    fn test_short_and_non_ascii_words() {
        assert_eq!(stem("Is"), "is");
        assert_eq!(stem("café"), "café");
    }

    #[test]
    fn test_measure() {
        let measure = |w: &str| Word::new(w.as_bytes().to_vec()).measure();

        assert_eq!(measure("tree"), 0);
        assert_eq!(measure("trees"), 1);
        assert_eq!(measure("trouble"), 1);
        assert_eq!(measure("troubles"), 2);
        assert_eq!(measure("oaten"), 2);
    }
}
