use super::{
    assemble, information, plan, structural, Atom, AtomEncoder, ConnectivityGraph, RelationSet,
    SchemaSet, WeightedProblem,
};
use crate::maxsat::MaxSatSolverFactory;
use crate::model::{ActionSchema, EffectKind, LearnedModel};
use crate::trace::{ActionInstance, ObservationKind, TraceCorpus};
use anyhow::{anyhow, Result};
use std::collections::HashMap;

/// The parameters of a learning run.
#[derive(Debug, Clone, Copy)]
pub struct ArmsConfig {
    /// The size the largest relation set of a schema must reach for the
    /// schema to be considered fully learned.
    pub upper_bound: usize,
    /// The threshold of the frequent-pair mining.
    pub min_support: usize,
    /// The weight of the structural constraints.
    pub structural_weight: u64,
    /// The weight of the I1/I2 information constraints.
    pub info_weight: u64,
    /// The support rate above which a support-counted constraint weighs its
    /// rate instead of its family default.
    pub threshold: f64,
    /// The default weight of the I3 constraints.
    pub info3_default_weight: u64,
    /// The default weight of the plan constraints.
    pub plan_default_weight: u64,
}

impl ArmsConfig {
    /// Builds a configuration with the default parameters and the given
    /// upper bound.
    pub fn new(upper_bound: usize) -> Self {
        Self {
            upper_bound,
            min_support: 2,
            structural_weight: 110,
            info_weight: 100,
            threshold: 0.6,
            info3_default_weight: 30,
            plan_default_weight: 30,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.upper_bound == 0 {
            return Err(anyhow!("the upper bound must be at least 1"));
        }
        if self.min_support == 0 {
            return Err(anyhow!("the minimal support must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(anyhow!(
                "the threshold must lie between 0 and 1 (got {})",
                self.threshold
            ));
        }
        Ok(())
    }
}

/// A trait for objects notified of the milestones of a learning run.
///
/// All the methods default to doing nothing; implementors override the ones
/// they care about.
pub trait LearningListener {
    /// Called when the constraints of a round have been assembled.
    fn constraints_generated(&mut self, _round: usize, _problem: &WeightedProblem) {}

    /// Called when the oracle has solved the instance of a round, with the
    /// decoded facts.
    fn round_solved(&mut self, _round: usize, _facts: &[(Atom, bool)]) {}

    /// Called when a schema has been retired.
    fn schema_retired(&mut self, _round: usize, _schema: &ActionSchema) {}
}

/// The ARMS learning loop.
///
/// Each round generalizes nothing new: the vocabulary and the schema set are
/// built once from the corpus, then the loop generates the weighted
/// constraints of the active schemas, solves them through a fresh oracle from
/// the injected factory, folds the decoded facts into the schemas and retires
/// the fully learned ones. The loop ends when every schema is retired; a
/// round bringing neither a new fact nor a retirement retires all the
/// remaining schemas as they stand, as replaying it could not change the
/// instance.
pub struct ArmsLearner<'a> {
    config: ArmsConfig,
    factory: &'a dyn MaxSatSolverFactory,
    listeners: Vec<Box<dyn LearningListener + 'a>>,
}

impl<'a> ArmsLearner<'a> {
    /// Builds a new learner.
    ///
    /// An error is returned if the configuration is invalid.
    pub fn new(config: ArmsConfig, factory: &'a dyn MaxSatSolverFactory) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            factory,
            listeners: Vec::new(),
        })
    }

    /// Registers a listener.
    pub fn add_listener(&mut self, listener: Box<dyn LearningListener + 'a>) {
        self.listeners.push(listener);
    }

    /// Learns an action model from the corpus.
    ///
    /// An error is returned if the corpus was not produced under the
    /// partial-observability policy, if the oracle fails or proves no
    /// optimum, or if the decoded facts contradict each other.
    pub fn learn(&mut self, corpus: &TraceCorpus) -> Result<LearnedModel> {
        Self::check_kind(corpus)?;
        let fluents = corpus.fluents();
        let relations = RelationSet::generalizing(&fluents);
        let (mut schemas, mut instance_map) = SchemaSet::generalizing(corpus);
        let mut graph = ConnectivityGraph::new(&schemas);
        let mut learned = Vec::new();
        let mut round = 0;
        while schemas.n_active() > 0 {
            round += 1;
            let problem =
                self.round_problem(corpus, &relations, &schemas, &graph, &instance_map)?;
            for l in self.listeners.iter_mut() {
                l.constraints_generated(round, &problem);
            }
            if problem.is_empty() {
                self.retire(round, None, &mut schemas, &mut graph, &mut instance_map, &mut learned);
                break;
            }
            let mut encoder = AtomEncoder::default();
            let mut solver = self.factory.new_solver();
            encoder.encode_into(&problem, solver.as_mut());
            let assignment = solver.solve()?.into_optimum().ok_or_else(|| {
                anyhow!("the MaxSAT oracle did not prove an optimum at round {}", round)
            })?;
            let facts = encoder.decode(&assignment);
            for l in self.listeners.iter_mut() {
                l.round_solved(round, &facts);
            }
            let n_new_facts = Self::apply_facts(&facts, &relations, &mut schemas)?;
            let n_retired = self.retire(
                round,
                Some(self.config.upper_bound),
                &mut schemas,
                &mut graph,
                &mut instance_map,
                &mut learned,
            );
            if n_new_facts == 0 && n_retired == 0 {
                self.retire(round, None, &mut schemas, &mut graph, &mut instance_map, &mut learned);
                break;
            }
        }
        Ok(LearnedModel::new(fluents, learned))
    }

    /// Assembles the weighted problem of the first round without solving it.
    pub fn first_round_problem(&self, corpus: &TraceCorpus) -> Result<WeightedProblem> {
        Self::check_kind(corpus)?;
        let relations = RelationSet::generalizing(&corpus.fluents());
        let (schemas, instance_map) = SchemaSet::generalizing(corpus);
        let graph = ConnectivityGraph::new(&schemas);
        self.round_problem(corpus, &relations, &schemas, &graph, &instance_map)
    }

    fn check_kind(corpus: &TraceCorpus) -> Result<()> {
        if corpus.kind() != ObservationKind::Partial {
            return Err(anyhow!(
                r#"incompatible observation kind "{}"; expected "partial""#,
                corpus.kind()
            ));
        }
        Ok(())
    }

    fn round_problem(
        &self,
        corpus: &TraceCorpus,
        relations: &RelationSet,
        schemas: &SchemaSet,
        graph: &ConnectivityGraph,
        instance_map: &HashMap<ActionInstance, usize>,
    ) -> Result<WeightedProblem> {
        let structural = structural::generate(schemas, relations);
        let information = information::generate(corpus, relations, instance_map);
        let plan_counts =
            plan::generate(corpus, relations, graph, instance_map, self.config.min_support);
        assemble(
            structural,
            self.config.structural_weight,
            information,
            self.config.info_weight,
            plan_counts,
            self.config.threshold,
            self.config.info3_default_weight,
            self.config.plan_default_weight,
        )
    }

    fn apply_facts(
        facts: &[(Atom, bool)],
        relations: &RelationSet,
        schemas: &mut SchemaSet,
    ) -> Result<usize> {
        let mut n_new_facts = 0;
        for (atom, value) in facts {
            if let Atom::Membership {
                relation,
                kind,
                schema,
            } = atom
            {
                let relation = relations.get(*relation).clone();
                let schema = schemas.get_mut(*schema);
                if !value {
                    // memberships are monotone: once committed, a relation
                    // cannot be retracted by a later round
                    if schema.relations_of(*kind).contains(&relation) {
                        return Err(anyhow!(
                            r#"contradictory facts about "{}" in schema "{}": the membership in {} committed by an earlier round is now denied"#,
                            relation,
                            schema,
                            kind
                        ));
                    }
                    continue;
                }
                // a relation cannot be both required and added
                let excluded = match kind {
                    EffectKind::Precond => Some(EffectKind::Add),
                    EffectKind::Add => Some(EffectKind::Precond),
                    EffectKind::Delete => None,
                };
                if let Some(excluded) = excluded {
                    if schema.relations_of(excluded).contains(&relation) {
                        return Err(anyhow!(
                            r#"contradictory memberships of "{}" in schema "{}": both {} and {}"#,
                            relation,
                            schema,
                            kind,
                            excluded
                        ));
                    }
                }
                if schema.insert(*kind, relation) {
                    n_new_facts += 1;
                }
            }
        }
        Ok(n_new_facts)
    }

    /// Retires the active schemas whose largest set reached the bound, or
    /// all of them if no bound is given. Returns the number of retirements.
    fn retire(
        &mut self,
        round: usize,
        bound: Option<usize>,
        schemas: &mut SchemaSet,
        graph: &mut ConnectivityGraph,
        instance_map: &mut HashMap<ActionInstance, usize>,
        learned: &mut Vec<ActionSchema>,
    ) -> usize {
        let ids = schemas
            .iter_active()
            .filter(|(_, s)| bound.map(|b| s.max_set_len() >= b).unwrap_or(true))
            .map(|(id, _)| id)
            .collect::<Vec<usize>>();
        for id in &ids {
            let schema = schemas.retire(*id);
            graph.remove_schema(*id);
            instance_map.retain(|_, v| v != id);
            for l in self.listeners.iter_mut() {
                l.schema_retired(round, &schema);
            }
            learned.push(schema);
        }
        ids.len()
    }
}
