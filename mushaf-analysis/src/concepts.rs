//! Conceptual stem matching over the normalized corpus.

use mushaf_core::VerseRecord;
use mushaf_text::{token_matches_stem, tokens, ConceptStemSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One matched surface form and how often it occurred.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConceptForm {
    pub form: String,
    pub count: u64,
}

/// Match result for one concept: the aggregate total plus every distinct
/// surface form, so reports can show what actually matched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConceptReport {
    pub concept: String,
    pub total: u64,
    pub forms: Vec<ConceptForm>,
}

/// Count whole-token matches of `(clitic-prefix)?(stem)` for every concept.
pub fn concept_frequency(records: &[VerseRecord], set: &ConceptStemSet) -> Vec<ConceptReport> {
    // Tokens are already split per record; flattening afterwards cannot
    // merge words across verse boundaries.
    let all_tokens: Vec<&str> = records
        .iter()
        .flat_map(|r| tokens(&r.text_normalized))
        .collect();

    set.concepts()
        .iter()
        .map(|concept| {
            let mut order: Vec<&str> = Vec::new();
            let mut counts: HashMap<&str, u64> = HashMap::new();
            for &token in &all_tokens {
                if concept
                    .stems
                    .iter()
                    .any(|stem| token_matches_stem(token, stem))
                {
                    let count = counts.entry(token).or_insert(0);
                    if *count == 0 {
                        order.push(token);
                    }
                    *count += 1;
                }
            }

            let mut forms: Vec<ConceptForm> = order
                .into_iter()
                .map(|form| ConceptForm {
                    form: form.to_string(),
                    count: counts[form],
                })
                .collect();
            forms.par_sort_by(|a, b| b.count.cmp(&a.count));
            let total = forms.iter().map(|f| f.count).sum();

            ConceptReport {
                concept: concept.label.clone(),
                total,
                forms,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mushaf_core::{RecordBuilder, SurahMeta};

    fn records_from(verses: &[&str]) -> Vec<VerseRecord> {
        let builder = RecordBuilder::new();
        let meta = SurahMeta {
            index: 1,
            name_en: "Test".to_string(),
            name_ar: "اختبار".to_string(),
            revelation_place: "Mecca".to_string(),
            revelation_type: "Makkiyah".to_string(),
            juz_boundaries: vec![],
        };
        let pairs: Vec<(String, String)> = verses
            .iter()
            .enumerate()
            .map(|(i, text)| (format!("verse_{}", i + 1), text.to_string()))
            .collect();
        builder.build_chapter(&meta, &pairs)
    }

    fn earth_only() -> ConceptStemSet {
        let mut set = ConceptStemSet::new();
        set.push("Earth", vec!["ارض".to_string()]);
        set
    }

    #[test]
    fn prefixed_token_matches_but_substring_does_not() {
        let records = records_from(&["وارض جوارض", "الارض"]);
        let reports = concept_frequency(&records, &earth_only());
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].total, 2);
        let forms: Vec<&str> = reports[0].forms.iter().map(|f| f.form.as_str()).collect();
        assert_eq!(forms, ["وارض", "الارض"]);
    }

    #[test]
    fn forms_are_counted_individually() {
        let records = records_from(&["ارض وارض", "وارض"]);
        let reports = concept_frequency(&records, &earth_only());
        assert_eq!(reports[0].total, 3);
        assert_eq!(reports[0].forms[0].form, "وارض");
        assert_eq!(reports[0].forms[0].count, 2);
        assert_eq!(reports[0].forms[1].form, "ارض");
        assert_eq!(reports[0].forms[1].count, 1);
    }

    #[test]
    fn empty_corpus_reports_zero_for_each_concept() {
        let reports = concept_frequency(&[], &mushaf_text::default_concepts());
        assert_eq!(reports.len(), mushaf_text::default_concepts().len());
        assert!(reports.iter().all(|r| r.total == 0 && r.forms.is_empty()));
    }
}
