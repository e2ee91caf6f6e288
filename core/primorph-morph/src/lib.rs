pub mod builder;
pub mod dictionary;
pub mod primes;
pub mod registry;
pub mod render;
pub mod resolver;

pub use builder::{
    BuildConfig, BuildError, BuildReport, DictionaryBuilder, LineIssue, MalformedLinePolicy,
};
pub use dictionary::{LexicalDictionary, LexicalEntry};
pub use primorph_parser::LineFault;
pub use primorph_protocol::{DictionaryStats, FormRecord, Prime, Tag, TagCode};
pub use registry::{EncodeError, TagRegistry};
pub use resolver::{resolve_form, Resolution};

/// A tag registry and the dictionary built alongside it.
///
/// Immutable once built: every query takes `&self`, so one instance can be
/// shared across threads without locking.
#[derive(Debug, Clone)]
pub struct Morpher {
    registry: TagRegistry,
    dictionary: LexicalDictionary,
}

impl Morpher {
    /// Builds from dictionary lines, skipping malformed lines with a warning.
    pub fn create<I, S>(lines: I) -> Morpher
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = DictionaryBuilder::new(BuildConfig::default());
        for line in lines {
            if let Err(issue) = builder.feed(line.as_ref()) {
                builder.tolerate(issue);
            }
        }
        builder.finish().0
    }

    pub fn from_lines<I, S>(
        lines: I,
        config: BuildConfig,
    ) -> Result<(Morpher, BuildReport), BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = DictionaryBuilder::new(config);
        builder.extend(lines)?;
        Ok(builder.finish())
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn dictionary(&self) -> &LexicalDictionary {
        &self.dictionary
    }

    /// Inflected form of `base_word` for `code`, or `base_word` itself when
    /// the lemma is unknown or has no exact or one-tag-richer form.
    pub fn resolve(&self, base_word: &str, code: TagCode) -> String {
        match self.lookup(base_word, code).surface() {
            Some(surface) => surface.to_string(),
            None => base_word.to_string(),
        }
    }

    pub fn lookup(&self, base_word: &str, code: TagCode) -> Resolution<'_> {
        resolve_form(&self.dictionary, &base_word.to_lowercase(), code)
    }

    /// Stored forms of `lemma` in dictionary order, with decoded tags.
    pub fn forms(&self, lemma: &str) -> Option<Vec<FormRecord>> {
        let entry = self.dictionary.entry(&lemma.to_lowercase())?;
        Some(
            entry
                .iter()
                .map(|(code, surface)| FormRecord {
                    code,
                    surface: surface.to_string(),
                    tags: self.registry.decode(code).unwrap_or_default(),
                })
                .collect(),
        )
    }

    pub fn stats(&self) -> DictionaryStats {
        DictionaryStats {
            lemmas: self.dictionary.lemma_count(),
            forms: self.dictionary.form_count(),
            tags: self.registry.len(),
            max_prime: self.registry.max_prime().map(Prime::get).unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FIRST_PRIMES: [u64; 24] = [
        2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83,
        89,
    ];

    fn vocabulary() -> Vec<String> {
        (0..24).map(|i| format!("tag{i}")).collect()
    }

    fn cat_dictionary() -> Morpher {
        Morpher::create([
            "1",
            "кот\tNOUN,sing,nom",
            "коты\tNOUN,plur,nom",
        ])
    }

    fn code(morpher: &Morpher, tags: &[&str]) -> TagCode {
        morpher.registry().lookup_code(tags).unwrap()
    }

    #[test]
    fn test_exact_match() {
        let morpher = Morpher::create([
            "1",
            "кот\tnoun,sing",
            "кот\tnoun,sing",
            "коты\tnoun,plur",
        ]);

        let plural = code(&morpher, &["noun", "plur"]);
        let singular = code(&morpher, &["noun", "sing"]);
        assert_eq!(morpher.resolve("кот", plural), "коты");
        assert_eq!(morpher.resolve("кот", singular), "кот");
        assert_eq!(morpher.lookup("КОТ", plural), Resolution::Exact("коты"));
    }

    #[test]
    fn test_exact_beats_nearest() {
        let morpher = Morpher::create([
            "7",
            "дом\tnoun,sing,nom",
            "дом\tnoun,sing,nom",
            "домик\tnoun,sing,nom,dim",
        ]);

        let full = code(&morpher, &["noun", "sing", "nom"]);
        assert_eq!(morpher.resolve("дом", full), "дом");

        // No form is stored under {noun,sing,dim}; домик has exactly one more tag
        let without_case = code(&morpher, &["noun", "sing", "dim"]);
        let dim = morpher.registry().prime_of("dim").unwrap();
        let nom = morpher.registry().prime_of("nom").unwrap();
        assert_ne!(dim, nom);
        assert_eq!(
            morpher.lookup("дом", without_case),
            Resolution::Nearest { surface: "домик", extra: nom.get() }
        );
    }

    #[test]
    fn test_nearest_uses_dictionary_order() {
        let morpher = Morpher::create([
            "1",
            "стол\tnoun,sing,nomn",
            "столы\tnoun,plur,nomn",
            "стола\tnoun,sing,gent",
            "столом\tnoun,sing,ablt",
        ]);

        // стола and столом both add one tag to {noun,sing}; the first one read wins
        let wanted = code(&morpher, &["noun", "sing"]);
        assert_eq!(morpher.resolve("стол", wanted), "стола");

        // {noun} alone is two tags away from everything stored
        let noun = code(&morpher, &["noun"]);
        assert_eq!(morpher.lookup("стол", noun), Resolution::Unchanged);
        assert_eq!(morpher.resolve("стол", noun), "стол");
    }

    #[test]
    fn test_unconstrained_picks_single_tag_form() {
        let morpher = Morpher::create([
            "1",
            "ёж\tnoun",
            "ежи\tnoun,plur",
            "ёж\tanim",
        ]);

        assert_eq!(
            morpher.lookup("ёж", TagCode::UNCONSTRAINED),
            Resolution::Nearest { surface: "ёж", extra: 5 }
        );
    }

    #[test]
    fn test_unknown_lemma_passes_through() {
        let morpher = cat_dictionary();
        assert_eq!(morpher.resolve("зпргы", TagCode::new(30)), "зпргы");
        assert_eq!(morpher.resolve("Зпргы", TagCode::UNCONSTRAINED), "Зпргы");
    }

    #[test]
    fn test_render_end_to_end() {
        let morpher = cat_dictionary();
        assert_eq!(morpher.render("кот{NOUN,plur,nom}"), "коты");
        assert_eq!(morpher.render("Мой   Кот{noun,PLUR,nom}\tспит"), "мой коты спит");
    }

    #[test]
    fn test_render_pass_through() {
        let morpher = cat_dictionary();
        assert_eq!(morpher.render("Привет мир"), "привет мир");
        assert_eq!(morpher.render("кот{}"), "кот");
        assert_eq!(morpher.render("кот{ "), "кот");
    }

    #[test]
    fn test_render_unicode_whitespace() {
        let morpher = cat_dictionary();
        assert_eq!(morpher.render("мой\u{a0}кот{noun,plur,nom} спит"), "мой коты спит");
        assert_eq!(morpher.render("\u{a0}кот{noun,plur,nom} спит"), "коты спит");
        assert_eq!(morpher.render("мой\x0cкот{noun,plur,nom} спит"), "мой коты спит");
        assert_eq!(morpher.render("привет\u{2003}мир"), "привет мир");
    }

    #[test]
    fn test_render_overflowing_specifier_keeps_base() {
        let morpher = cat_dictionary();
        // 2^64 does not fit in a tag code
        let sentence = format!("кот{{{}}} спит", vec!["noun"; 64].join(","));
        assert_eq!(morpher.render(&sentence), "кот спит");
        assert_eq!(morpher.render("кот{noun,plur,nom} спит"), "коты спит");
    }

    #[test]
    fn test_render_empty() {
        let morpher = cat_dictionary();
        assert_eq!(morpher.render(""), "");
        assert_eq!(morpher.render("   "), "");
    }

    #[test]
    fn test_render_unknown_tag_drops_constraints() {
        let morpher = Morpher::create([
            "1",
            "кот\tnoun,sing",
            "коты\tnoun,plur",
            "котище\taugm",
        ]);
        // "datv" is unknown, so the request becomes code 1: first single-tag form
        assert_eq!(morpher.render("кот{noun,datv}"), "котище");
        assert_eq!(morpher.render("кот{noun,plur}"), "коты");
        assert_eq!(morpher.render("коты{noun,datv}"), "коты");
    }

    #[test]
    fn test_lemma_line_not_stored_by_default() {
        let lines = ["1", "кот\tnoun,sing", "коты\tnoun,plur"];

        let morpher = Morpher::create(lines);
        let entry = morpher.dictionary().entry("кот").unwrap();
        assert_eq!(entry.len(), 1);

        let config = BuildConfig {
            index_lemma_form: true,
            ..BuildConfig::default()
        };
        let (morpher, report) = Morpher::from_lines(lines, config).unwrap();
        assert_eq!(morpher.dictionary().entry("кот").unwrap().len(), 2);
        assert_eq!(report.forms, 2);
        assert_eq!(report.lemmas, 1);
    }

    #[test]
    fn test_repeated_lemma_line_competes_as_form() {
        let (morpher, report) = Morpher::from_lines(
            [
                "1",
                "дом\tnoun,sing",
                "дома\tnoun,plur",
                "2",
                "ДОМ\tnoun,sing",
                "домы\tnoun,plur",
            ],
            BuildConfig::default(),
        )
        .unwrap();

        let forms = morpher.forms("дом").unwrap();
        let surfaces: Vec<&str> = forms.iter().map(|f| f.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["дома", "дом"]);
        assert_eq!(report.groups, 2);
        assert_eq!(report.lemmas, 1);
        assert_eq!(report.duplicates, 1);

        let tags: Vec<String> = forms[1].tags.iter().map(|t| t.to_string()).collect();
        assert_eq!(tags, vec!["noun", "sing"]);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let (morpher, report) = Morpher::from_lines(
            [
                "сирота\tnoun",
                "1",
                "кот\tnoun,sing",
                "коты без табуляции",
                "",
                "   ",
                "коты\tnoun,plur",
            ],
            BuildConfig {
                malformed_lines: MalformedLinePolicy::Skip,
                ..BuildConfig::default()
            },
        )
        .unwrap();

        assert_eq!(
            report.issues,
            vec![
                LineIssue { line: 1, fault: LineFault::OrphanForm },
                LineIssue { line: 4, fault: LineFault::MissingTags },
            ]
        );
        assert_eq!(report.lines, 7);
        // Blank lines did not end the group
        let plural = code(&morpher, &["noun", "plur"]);
        assert_eq!(morpher.resolve("кот", plural), "коты");
    }

    #[test]
    fn test_rejected_lemma_orphans_its_group() {
        let (morpher, report) = Morpher::from_lines(
            ["1", "\tnoun", "коты\tnoun,plur", "2", "кит\tnoun", "киты\tnoun,plur"],
            BuildConfig::default(),
        )
        .unwrap();

        assert_eq!(
            report.issues,
            vec![
                LineIssue { line: 2, fault: LineFault::MissingSurface },
                LineIssue { line: 3, fault: LineFault::OrphanForm },
            ]
        );
        assert_eq!(morpher.stats().lemmas, 1);
    }

    #[test]
    fn test_overflowing_lines_are_rejected() {
        let too_many = vec!["noun"; 64].join(",");
        let lines = vec![
            "1".to_string(),
            format!("кот\t{too_many}"),
            "коты\tnoun,plur".to_string(),
            "2".to_string(),
            "кит\tnoun".to_string(),
            format!("киты\t{too_many}"),
            "кита\tnoun,gent".to_string(),
        ];
        let (morpher, report) = Morpher::from_lines(
            &lines,
            BuildConfig {
                malformed_lines: MalformedLinePolicy::Skip,
                ..BuildConfig::default()
            },
        )
        .unwrap();

        assert_eq!(
            report.issues,
            vec![
                LineIssue { line: 2, fault: LineFault::CodeOverflow },
                LineIssue { line: 3, fault: LineFault::OrphanForm },
                LineIssue { line: 6, fault: LineFault::CodeOverflow },
            ]
        );
        assert!(morpher.dictionary().entry("кот").is_none());
        // An overflowing form line does not end its group
        let surfaces: Vec<String> = morpher
            .forms("кит")
            .unwrap()
            .into_iter()
            .map(|f| f.surface)
            .collect();
        assert_eq!(surfaces, vec!["кита"]);
    }

    #[test]
    fn test_abort_policy() {
        let result = Morpher::from_lines(
            ["1", "кот\tnoun", "коты\t"],
            BuildConfig {
                malformed_lines: MalformedLinePolicy::Abort,
                ..BuildConfig::default()
            },
        );
        assert_eq!(
            result.unwrap_err(),
            BuildError::Aborted { line: 3, fault: LineFault::EmptyTagList }
        );
    }

    #[test]
    fn test_stats() {
        let morpher = cat_dictionary();
        assert_eq!(
            morpher.stats(),
            DictionaryStats { lemmas: 1, forms: 1, tags: 4, max_prime: 7 }
        );
    }

    #[test]
    fn test_concurrent_reads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Morpher>();

        let morpher = cat_dictionary();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| morpher.render("кот{noun,plur,nom} кот")))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), "коты кот");
            }
        });
    }

    #[test]
    fn test_monotonic_primes() {
        let mut registry = TagRegistry::new();
        for (tag, expected) in vocabulary().iter().zip(FIRST_PRIMES) {
            assert_eq!(registry.register_or_get(tag).get(), expected);
        }
        assert_eq!(registry.max_prime(), Some(Prime::new(89)));
    }

    proptest! {
        #[test]
        fn test_injective_over_subsets(
            a in prop::sample::subsequence(vocabulary(), 0..=6),
            b in prop::sample::subsequence(vocabulary(), 0..=6)
        ) {
            let mut registry = TagRegistry::new();
            for tag in vocabulary() {
                registry.register_or_get(&tag);
            }

            let code_a = registry.encode(&a).unwrap();
            let code_b = registry.encode(&b).unwrap();
            // subsequence keeps vocabulary order, so equal sets are equal vecs
            prop_assert_eq!(code_a == code_b, a == b);
        }

        #[test]
        fn test_order_independent(
            tags in prop::sample::subsequence(vocabulary(), 0..=6).prop_shuffle()
        ) {
            let mut registry = TagRegistry::new();
            let shuffled = registry.encode(&tags).unwrap();

            let mut sorted = tags.clone();
            sorted.sort();
            prop_assert_eq!(registry.encode(&sorted).unwrap(), shuffled);
            prop_assert_eq!(registry.len(), tags.len());
        }
    }
}
