use std::collections::{BTreeSet, HashMap, HashSet};

use wat_algebra::LineageQuery;
use wat_machine::{EnumeratedTrace, StateMachine};
use wat_types::{Arity, Database, Lineage, Record, RecordId, RelationName, Schema, Timestamp, TimestampedRecord};

#[derive(Clone)]
pub struct Rule {
    pub target: RelationName,
    pub query: LineageQuery,
}

impl Rule {
    pub fn new(target: impl Into<RelationName>, query: LineageQuery) -> Rule {
        Rule { target: target.into(), query }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub relation_name: RelationName,
    pub record: Record,
}

impl Input {
    pub fn new(relation_name: impl Into<RelationName>, record: Record) -> Input {
        Input { relation_name: relation_name.into(), record }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub reply: HashSet<Record>,
}

pub struct WhiteBox {
    timestamp: Timestamp,
    schema: Schema,
    db: Database,
    rules: HashMap<RelationName, Vec<Rule>>,
    lineage: HashMap<RecordId, Lineage>,
    inputs: HashMap<u64, Input>,
    outputs: HashMap<u64, Output>,
    output_lineage: HashMap<u64, HashMap<RecordId, Lineage>>,
}

impl Default for WhiteBox {
    fn default() -> Self {
        WhiteBox::new()
    }
}

impl WhiteBox {
    pub fn new() -> Self {
        WhiteBox {
            timestamp: Timestamp::INITIAL,
            schema: Schema::new(),
            db: Database::new(),
            rules: HashMap::new(),
            lineage: HashMap::new(),
            inputs: HashMap::new(),
            outputs: HashMap::new(),
            output_lineage: HashMap::new(),
        }
    }

    pub fn create_table(&mut self, name: impl Into<RelationName>, arity: Arity) {
        let name = name.into();
        assert!(!self.schema.contains_key(&name), "table {name:?} already exists");
        self.schema.insert(name.clone(), arity);
        self.db.insert(name, HashSet::new());
    }

    pub fn register_rules(&mut self, relation_name: impl Into<RelationName>, rules: Vec<Rule>) {
        let relation_name = relation_name.into();
        assert!(!self.rules.contains_key(&relation_name), "rules already registered for {relation_name:?}");
        assert!(!rules.is_empty(), "register_rules requires at least one rule");
        self.rules.insert(relation_name, rules);
    }

    pub fn state(&self) -> &Database {
        &self.db
    }

    fn flatten_lineage(&self, lineage: &Lineage) -> HashSet<RecordId> {
        let mut output = HashSet::new();
        for witness in lineage {
            for rid in witness {
                if rid.timestamp.step == 0 {
                    output.insert(rid.clone());
                } else {
                    let upstream = self
                        .lineage
                        .get(rid)
                        .unwrap_or_else(|| panic!("no lineage recorded for derived record {rid:?}"));
                    output.extend(self.flatten_lineage(upstream));
                }
            }
        }
        output
    }

    pub fn get_output_lineage(&self, j: u64) -> HashMap<RecordId, EnumeratedTrace<Input, Output>> {
        let output_lineage = self
            .output_lineage
            .get(&j)
            .unwrap_or_else(|| panic!("no output recorded for tick {j}"));

        let mut ans = HashMap::new();
        for (rid, lineage) in output_lineage {
            let rids = self.flatten_lineage(lineage);
            let ticks: BTreeSet<u64> = rids
                .into_iter()
                .map(|rid| rid.timestamp.tick)
                .filter(|&tick| tick != j)
                .collect();
            let sub_trace = ticks
                .into_iter()
                .map(|tick| {
                    let input = self.inputs[&tick].clone();
                    let output = self.outputs[&tick].clone();
                    (tick as usize, input, output)
                })
                .collect();
            ans.insert(rid.clone(), sub_trace);
        }
        ans
    }
}

impl StateMachine for WhiteBox {
    type Input = Input;
    type Output = Output;

    fn reset(&mut self) {
        self.timestamp = Timestamp::INITIAL;
        self.db = self.schema.keys().map(|name| (name.clone(), HashSet::new())).collect();
        self.lineage.clear();
    }

    fn transition(&mut self, input: &Input) -> Output {
        let relation_name = &input.relation_name;
        assert!(self.schema.contains_key(relation_name), "unknown relation {relation_name:?}");
        assert!(self.rules.contains_key(relation_name), "no rules registered for {relation_name:?}");
        assert_eq!(
            input.record.len(),
            self.schema[relation_name],
            "record {:?} does not match arity of {relation_name:?}",
            input.record
        );

        let tick = self.timestamp.tick;
        self.inputs.insert(tick, input.clone());

        // Add the request to the request table at step 0.
        self.db
            .get_mut(relation_name)
            .expect("schema and db are kept in lockstep")
            .insert(TimestampedRecord::new(input.record.clone(), self.timestamp));

        let rules = self.rules[relation_name].clone();
        let (last_rule, intermediate_rules) = rules.split_last().expect("register_rules requires >= 1 rule");

        for rule in intermediate_rules {
            self.timestamp = self.timestamp.increment_step();
            let answer = rule
                .query
                .eval(&self.db)
                .unwrap_or_else(|err| panic!("white-box rule query failed: {err:?}"));
            let records: HashSet<Record> = answer.iter().map(|(r, _)| r.clone()).collect();

            assert!(self.schema.contains_key(&rule.target), "rule targets undeclared relation {:?}", rule.target);
            // Persistent records (still produced) keep their original
            // timestamp; everything else is replaced.
            let existing = self.db.get_mut(&rule.target).expect("schema and db are kept in lockstep");
            existing.retain(|tr| records.contains(&tr.record));
            for record in &records {
                existing.insert(TimestampedRecord::new(record.clone(), self.timestamp));
            }

            for (record, witness) in answer {
                let rid = RecordId::new(rule.target.clone(), record, self.timestamp);
                self.lineage.entry(rid).or_default().insert(witness);
            }
        }

        self.timestamp = self.timestamp.increment_step();
        let answer = last_rule
            .query
            .eval(&self.db)
            .unwrap_or_else(|err| panic!("white-box rule query failed: {err:?}"));

        let mut tick_output_lineage: HashMap<RecordId, Lineage> = HashMap::new();
        let mut reply: HashSet<Record> = HashSet::new();
        for (record, witness) in answer {
            let rid = RecordId::new(last_rule.target.clone(), record.clone(), self.timestamp);
            tick_output_lineage.entry(rid).or_default().insert(witness);
            reply.insert(record);
        }
        self.output_lineage.insert(tick, tick_output_lineage);

        let output = Output { reply };
        self.outputs.insert(tick, output.clone());

        self.timestamp = self.timestamp.increment_tick();
        self.db.insert(relation_name.clone(), HashSet::new());

        output
    }
}
