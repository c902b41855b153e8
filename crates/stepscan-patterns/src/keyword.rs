//! Multilingual step keyword table and category handling.
//!
//! Declarations and feature lines may use any Gherkin dialect, so keyword
//! recognition works over a flat table of spellings (with internal spaces
//! removed) mapped onto the five semantic categories. The generic markers
//! `defineStep`, `Step` and `StepDefinition` only appear in declarations and
//! map onto [`StepKeyword::Step`].

use std::fmt;

/// Semantic category of a step keyword.
///
/// `And` and `But` are continuations and take their meaning from the nearest
/// earlier primary keyword; see [`resolve`](Self::resolve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum StepKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform an action when testing behaviour.
    When,
    /// Assert the expected outcome of a scenario.
    Then,
    /// Additional conditions that share context with the previous step.
    And,
    /// Negative or contrasting conditions.
    But,
    /// Generic declaration marker usable under any keyword.
    Step,
}

impl StepKeyword {
    /// Return the category name.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepscan_patterns::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::Given.as_str(), "Given");
    /// assert_eq!(StepKeyword::Step.as_str(), "Step");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
            Self::Step => "Step",
        }
    }

    /// Whether the keyword is one of `Given`, `When` or `Then`.
    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Given | Self::When | Self::Then)
    }

    /// Whether the keyword continues the previous step (`And` or `But`).
    #[must_use]
    pub const fn is_conjunction(self) -> bool {
        matches!(self, Self::And | Self::But)
    }

    /// Resolve a continuation against the nearest earlier primary keyword.
    ///
    /// Primary keywords and the generic marker resolve to themselves. A
    /// continuation resolves to `previous` when that is primary, and to
    /// `None` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepscan_patterns::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::When.resolve(None), Some(StepKeyword::When));
    /// assert_eq!(
    ///     StepKeyword::And.resolve(Some(StepKeyword::Then)),
    ///     Some(StepKeyword::Then)
    /// );
    /// assert_eq!(StepKeyword::But.resolve(None), None);
    /// ```
    #[must_use]
    pub fn resolve(self, previous: Option<Self>) -> Option<Self> {
        if self.is_conjunction() {
            previous.filter(|keyword| keyword.is_primary())
        } else {
            Some(self)
        }
    }

    /// Classify a keyword spelling found in a declaration or feature line.
    ///
    /// Exact spellings are looked up first; a case-insensitive comparison is
    /// used as a fallback so decorator styles such as `@given` still resolve.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepscan_patterns::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::classify("Angenommen"), Some(StepKeyword::Given));
    /// assert_eq!(StepKeyword::classify("then"), Some(StepKeyword::Then));
    /// assert_eq!(StepKeyword::classify("defineStep"), Some(StepKeyword::Step));
    /// assert_eq!(StepKeyword::classify("Scenario"), None);
    /// ```
    #[must_use]
    pub fn classify(word: &str) -> Option<Self> {
        let table = GHERKIN_KEYWORDS
            .iter()
            .chain(GENERIC_STEP_MARKERS.iter());
        table
            .clone()
            .find(|(spelling, _)| *spelling == word)
            .or_else(|| {
                let lowered = word.to_lowercase();
                table
                    .into_iter()
                    .find(|(spelling, _)| spelling.to_lowercase() == lowered)
            })
            .map(|(_, keyword)| *keyword)
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration-only markers that register a step under any keyword.
///
/// Longer spellings come first so alternation prefers them.
pub const GENERIC_STEP_MARKERS: &[(&str, StepKeyword)] = &[
    ("defineStep", StepKeyword::Step),
    ("StepDefinition", StepKeyword::Step),
    ("Step", StepKeyword::Step),
];

/// Gherkin step keywords across supported dialects, in match priority order.
///
/// Multi-word keywords are stored without their internal spaces, matching the
/// way they are commonly written in identifiers and decorators.
pub const GHERKIN_KEYWORDS: &[(&str, StepKeyword)] = &[
    ("하지만", StepKeyword::But),
    ("조건", StepKeyword::Given),
    ("먼저", StepKeyword::Given),
    ("만일", StepKeyword::When),
    ("만약", StepKeyword::When),
    ("단", StepKeyword::But),
    ("그리고", StepKeyword::And),
    ("그러면", StepKeyword::Then),
    ("那麼", StepKeyword::Then),
    ("那么", StepKeyword::Then),
    ("而且", StepKeyword::And),
    ("同時", StepKeyword::And),
    ("當", StepKeyword::When),
    ("当", StepKeyword::When),
    ("前提", StepKeyword::Given),
    ("假設", StepKeyword::Given),
    ("假定", StepKeyword::Given),
    ("假如", StepKeyword::Given),
    ("但是", StepKeyword::But),
    ("但し", StepKeyword::But),
    ("並且", StepKeyword::And),
    ("并且", StepKeyword::And),
    ("もし", StepKeyword::When),
    ("ならば", StepKeyword::Then),
    ("ただし", StepKeyword::But),
    ("しかし", StepKeyword::But),
    ("かつ", StepKeyword::And),
    ("و", StepKeyword::And),
    ("متى", StepKeyword::When),
    ("لكن", StepKeyword::But),
    ("عندما", StepKeyword::When),
    ("ثم", StepKeyword::Then),
    ("بفرض", StepKeyword::Given),
    ("اذاً", StepKeyword::Then),
    ("כאשר", StepKeyword::When),
    ("וגם", StepKeyword::And),
    ("בהינתן", StepKeyword::Given),
    ("אזי", StepKeyword::Then),
    ("אז", StepKeyword::Then),
    ("אבל", StepKeyword::But),
    ("Якщо", StepKeyword::When),
    ("Унда", StepKeyword::Then),
    ("То", StepKeyword::Then),
    ("Тогда", StepKeyword::Then),
    ("Припустимощо", StepKeyword::Given),
    ("Припустимо", StepKeyword::Given),
    ("Онда", StepKeyword::Then),
    ("Но", StepKeyword::But),
    ("Нехай", StepKeyword::Given),
    ("Лекин", StepKeyword::But),
    ("Когато", StepKeyword::When),
    ("Када", StepKeyword::When),
    ("Кад", StepKeyword::When),
    ("Ктомуже", StepKeyword::And),
    ("И", StepKeyword::And),
    ("Задато", StepKeyword::Given),
    ("Задати", StepKeyword::Given),
    ("Задате", StepKeyword::Given),
    ("Если", StepKeyword::When),
    ("Допустим", StepKeyword::Given),
    ("Дадено", StepKeyword::Given),
    ("Ва", StepKeyword::And),
    ("Бирок", StepKeyword::But),
    ("Аммо", StepKeyword::But),
    ("Али", StepKeyword::But),
    ("Але", StepKeyword::But),
    ("Агар", StepKeyword::When),
    ("А", StepKeyword::But),
    ("І", StepKeyword::And),
    ("Și", StepKeyword::And),
    ("És", StepKeyword::And),
    ("anrhegediga", StepKeyword::Given),
    ("Zatati", StepKeyword::Given),
    ("Zakładając", StepKeyword::Given),
    ("Zadato", StepKeyword::Given),
    ("Zadate", StepKeyword::Given),
    ("Zadano", StepKeyword::Given),
    ("Zadani", StepKeyword::Given),
    ("Zadan", StepKeyword::Given),
    ("Youseknowwhenyousegot", StepKeyword::Given),
    ("Youseknowlikewhen", StepKeyword::When),
    ("Yna", StepKeyword::Then),
    ("Yaknowhow", StepKeyword::Given),
    ("Yagotta", StepKeyword::Then),
    ("Y", StepKeyword::And),
    ("Wun", StepKeyword::When),
    ("Wtedy", StepKeyword::Then),
    ("Wheny'all", StepKeyword::When),
    ("When", StepKeyword::When),
    ("Wenn", StepKeyword::When),
    ("WEN", StepKeyword::When),
    ("Và", StepKeyword::And),
    ("Ve", StepKeyword::And),
    ("Und", StepKeyword::And),
    ("Un", StepKeyword::And),
    ("Thì", StepKeyword::Then),
    ("Theny'all", StepKeyword::Then),
    ("Then", StepKeyword::Then),
    ("Tapi", StepKeyword::But),
    ("Tak", StepKeyword::Then),
    ("Tada", StepKeyword::Then),
    ("Tad", StepKeyword::Then),
    ("Så", StepKeyword::Then),
    ("Stel", StepKeyword::Given),
    ("Soit", StepKeyword::Given),
    ("Siis", StepKeyword::Then),
    ("Si", StepKeyword::And),
    ("Quando", StepKeyword::When),
    ("Quand", StepKeyword::When),
    ("Quan", StepKeyword::When),
    ("Pryd", StepKeyword::When),
    ("Pokud", StepKeyword::Given),
    ("Pokiaľ", StepKeyword::Given),
    ("Però", StepKeyword::But),
    ("Pero", StepKeyword::But),
    ("Pak", StepKeyword::Then),
    ("Oraz", StepKeyword::And),
    ("Onda", StepKeyword::Then),
    ("Ond", StepKeyword::But),
    ("Oletetaan", StepKeyword::Given),
    ("Og", StepKeyword::And),
    ("Och", StepKeyword::And),
    ("Ozaman", StepKeyword::Then),
    ("Når", StepKeyword::When),
    ("När", StepKeyword::When),
    ("Niin", StepKeyword::Then),
    ("Nhưng", StepKeyword::But),
    ("N", StepKeyword::And),
    ("Mutta", StepKeyword::But),
    ("Men", StepKeyword::But),
    ("Mas", StepKeyword::But),
    ("Maka", StepKeyword::Then),
    ("Majd", StepKeyword::Then),
    ("Mais", StepKeyword::But),
    ("Maar", StepKeyword::But),
    ("Ma", StepKeyword::But),
    ("Lorsque", StepKeyword::When),
    ("Lorsqu'", StepKeyword::When),
    ("Kun", StepKeyword::When),
    ("Kuid", StepKeyword::But),
    ("Kui", StepKeyword::When),
    ("Khi", StepKeyword::When),
    ("Keď", StepKeyword::When),
    ("Ketika", StepKeyword::When),
    ("Když", StepKeyword::When),
    ("Kai", StepKeyword::When),
    ("Kada", StepKeyword::When),
    ("Kad", StepKeyword::When),
    ("Jeżeli", StepKeyword::When),
    ("Ja", StepKeyword::And),
    ("Ir", StepKeyword::And),
    ("ICANHAZ", StepKeyword::Given),
    ("Ha", StepKeyword::When),
    ("Givun", StepKeyword::Given),
    ("Givet", StepKeyword::Given),
    ("Giveny'all", StepKeyword::Given),
    ("Given", StepKeyword::Given),
    ("Gitt", StepKeyword::Given),
    ("Gegeven", StepKeyword::Given),
    ("Gegebensei", StepKeyword::Given),
    ("Fakat", StepKeyword::But),
    ("Eğerki", StepKeyword::Given),
    ("Etantdonné", StepKeyword::Given),
    ("Et", StepKeyword::And),
    ("Então", StepKeyword::Then),
    ("Entonces", StepKeyword::Then),
    ("Entao", StepKeyword::Then),
    ("En", StepKeyword::And),
    ("Eeldades", StepKeyword::Given),
    ("E", StepKeyword::And),
    ("Duota", StepKeyword::Given),
    ("Dun", StepKeyword::Then),
    ("Donat", StepKeyword::Given),
    ("Donada", StepKeyword::Given),
    ("Diyelimki", StepKeyword::Given),
    ("Dengan", StepKeyword::Given),
    ("Denyousegotta", StepKeyword::Then),
    ("De", StepKeyword::But),
    ("Dato", StepKeyword::Given),
    ("Dar", StepKeyword::But),
    ("Dann", StepKeyword::Then),
    ("Dan", StepKeyword::Then),
    ("Dado", StepKeyword::Given),
    ("Dacă", StepKeyword::Given),
    ("Daca", StepKeyword::Given),
    ("DEN", StepKeyword::Then),
    ("Când", StepKeyword::When),
    ("Cuando", StepKeyword::When),
    ("Cho", StepKeyword::Given),
    ("Cept", StepKeyword::But),
    ("Cand", StepKeyword::When),
    ("Cal", StepKeyword::Then),
    ("Buty'all", StepKeyword::But),
    ("But", StepKeyword::But),
    ("Buh", StepKeyword::But),
    ("Biết", StepKeyword::Given),
    ("Bet", StepKeyword::But),
    ("BUT", StepKeyword::But),
    ("Atès", StepKeyword::Given),
    ("Atunci", StepKeyword::Then),
    ("Atesa", StepKeyword::Given),
    ("Angenommen", StepKeyword::Given),
    ("Andy'all", StepKeyword::And),
    ("And", StepKeyword::And),
    ("Ama", StepKeyword::But),
    ("Als", StepKeyword::When),
    ("Alors", StepKeyword::Then),
    ("Allora", StepKeyword::Then),
    ("Ali", StepKeyword::But),
    ("Aleshores", StepKeyword::Then),
    ("Ale", StepKeyword::But),
    ("Akkor", StepKeyword::Then),
    ("Aber", StepKeyword::But),
    ("AN", StepKeyword::And),
    ("Ataké", StepKeyword::And),
    ("A", StepKeyword::And),
];

/// Join the escaped spellings of `keywords` into one regex alternation.
///
/// The caller supplies the surrounding group.
///
/// # Examples
///
/// ```
/// use stepscan_patterns::{GENERIC_STEP_MARKERS, keyword_alternation};
///
/// assert_eq!(
///     keyword_alternation(GENERIC_STEP_MARKERS),
///     "defineStep|StepDefinition|Step"
/// );
/// ```
#[must_use]
pub fn keyword_alternation(keywords: &[(&str, StepKeyword)]) -> String {
    keywords
        .iter()
        .map(|(spelling, _)| regex::escape(spelling))
        .collect::<Vec<_>>()
        .join("|")
}
