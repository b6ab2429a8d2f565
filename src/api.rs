use crate::engine::{
    Budget, CompletionMetrics, EnumerationMetrics, Enumerator, RewriteSystem, ShortLex, Strategy,
};
use crate::error::Error;
use crate::presentation::{Generator, parse_presentation};
use crate::{Spelled, Word};
use std::time::{Duration, Instant};

/// Options that affect completion and enumeration.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Limits for both loops; unlimited by default.
    pub budget: Budget,
    pub strategy: Strategy,
}

/// Result from [`group_order`] and [`group_order_with`].
#[derive(Debug, Clone)]
pub struct GroupOrder {
    /// Number of distinct elements.
    pub order: usize,
    /// Size of the completed rule set.
    pub rules: usize,
    /// Time spent parsing, completing and enumerating.
    pub elapsed: Duration,
}

/// Additional details returned by [`group_order_verbose_with`].
#[derive(Debug, Clone)]
pub struct CompletionDetails {
    /// Generators in first-seen order.
    pub alphabet: Vec<Generator>,
    pub completion: CompletionMetrics,
    pub enumeration: EnumerationMetrics,
    /// Completed rules rendered as `pattern -> replacement`, shortest first.
    pub rules: Vec<String>,
    /// The first normal forms in word order, for a quick look at the elements.
    pub samples: Vec<Word<Generator>>,
}

/// Result from [`group_order_verbose_with`].
#[derive(Debug, Clone)]
pub struct GroupOrderVerbose {
    pub order: usize,
    pub elapsed: Duration,
    pub details: CompletionDetails,
}

const SAMPLE_LIMIT: usize = 24;

/// Order of the group presented by `text`, with default [`Options`].
///
/// # Example
/// ```
/// let out = kbs::group_order("RRR\nSS\nRSRS").unwrap();
/// assert_eq!(out.order, 6);
/// ```
pub fn group_order(text: &str) -> Result<GroupOrder, Error> {
    group_order_with(text, &Options::default())
}

/// Order of the group presented by `text`, completing under shortlex with
/// the given `options`.
///
/// Fails with [`Error::DidNotConverge`] if a budget in `options` runs out.
pub fn group_order_with(text: &str, options: &Options) -> Result<GroupOrder, Error> {
    let run = run(text, options)?;
    Ok(GroupOrder { order: run.census_len, rules: run.rules.len(), elapsed: run.elapsed })
}

/// Like [`group_order_with`], plus per-round completion and per-level
/// enumeration details.
pub fn group_order_verbose_with(text: &str, options: &Options) -> Result<GroupOrderVerbose, Error> {
    let run = run(text, options)?;
    let details = CompletionDetails {
        alphabet: run.alphabet,
        completion: run.completion,
        enumeration: run.enumeration,
        rules: run.rules,
        samples: run.samples,
    };
    Ok(GroupOrderVerbose { order: run.census_len, elapsed: run.elapsed, details })
}

struct Run {
    alphabet: Vec<Generator>,
    census_len: usize,
    samples: Vec<Word<Generator>>,
    rules: Vec<String>,
    completion: CompletionMetrics,
    enumeration: EnumerationMetrics,
    elapsed: Duration,
}

fn run(text: &str, options: &Options) -> Result<Run, Error> {
    let started = Instant::now();
    let relations = parse_presentation(text)?;
    let mut system = RewriteSystem::new(relations, ShortLex)?.with_strategy(options.strategy);
    let census = Enumerator::for_system(&system).census(&mut system, &options.budget)?;

    let rules = system
        .completed_rules()
        .map(|rules| {
            rules
                .iter()
                .map(|rule| format!("{} -> {}", Spelled(rule.pattern()), Spelled(rule.replacement())))
                .collect()
        })
        .unwrap_or_default();
    let completion = system.completion_metrics().cloned().unwrap_or_default();

    Ok(Run {
        alphabet: system.alphabet().to_vec(),
        census_len: census.len(),
        samples: census.normal_forms.iter().take(SAMPLE_LIMIT).cloned().collect(),
        rules,
        completion,
        enumeration: census.metrics,
        elapsed: started.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;

    const S3: &str = "# dihedral group of order 6\nR^3\nS^2\n(RS)^2\n";
    const PSL_2_7: &str = "S^7\nT^2\n(S^4T)^4\n(ST)^3\n";

    #[test]
    fn group_order_counts_elements() {
        let out = group_order(S3).unwrap();
        assert_eq!(out.order, 6);
        assert_eq!(out.rules, 6);
        assert!(out.elapsed >= Duration::ZERO);
    }

    #[test]
    fn group_order_of_psl_2_7() {
        let out = group_order(PSL_2_7).unwrap();
        assert_eq!(out.order, 168);
        assert_eq!(out.rules, 32);
    }

    #[test]
    fn empty_presentation_is_the_trivial_group() {
        let out = group_order("# nothing here\n\n").unwrap();
        assert_eq!(out.order, 1);
        assert_eq!(out.rules, 0);
    }

    #[test]
    fn verbose_run_includes_metrics_and_rules() {
        let out = group_order_verbose_with(S3, &Options::default()).unwrap();
        assert_eq!(out.order, 6);
        assert_eq!(out.details.rules.len(), 6);
        assert_eq!(out.details.rules[0], "SS -> 1");
        assert_eq!(out.details.alphabet, vec![Generator::new('R'), Generator::new('S')]);
        assert!(!out.details.completion.rounds.is_empty());
        assert_eq!(out.details.completion.seed_rules, 3);
        assert_eq!(out.details.samples.len(), 6);
        assert!(out.details.samples[0].is_empty());
        assert!(out.details.completion.total <= out.elapsed);
    }

    #[test]
    fn budgets_surface_as_errors() {
        let options = Options { budget: Budget::unlimited().with_max_rounds(1), ..Options::default() };
        let err = group_order_with(PSL_2_7, &options).unwrap_err();
        assert!(err.is_budget());
        assert!(matches!(err, Error::DidNotConverge { stage: Stage::Completion, .. }));
    }

    #[test]
    fn strategies_agree_on_the_order() {
        for strategy in [Strategy::empty(), Strategy::SUBSUME, Strategy::all()] {
            let options = Options { strategy, ..Options::default() };
            assert_eq!(group_order_with(S3, &options).unwrap().order, 6, "{strategy:?}");
        }
    }

    #[test]
    fn parse_errors_propagate() {
        assert!(matches!(group_order("RRR\nS^0"), Err(Error::ZeroExponent { .. })));
    }
}
