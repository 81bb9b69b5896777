//! Structural comparison of two schema revisions.

use super::{Attribute, Entity, Identifier, Index, ResolverDef, Schema, Trigger};

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Differences between a current schema and a proposed one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDiff {
    /// Entities only present in the proposed schema
    pub new_tables: Vec<String>,

    /// Entities only present in the current schema
    pub removed_tables: Vec<String>,

    /// Entities present in both with at least one difference
    pub changed_tables: Vec<TableDiff>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDiff {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<Change<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Change<Identifier>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<MemberChanges<Attribute>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexes: Option<MemberChanges<Index>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolvers: Option<MemberChanges<ResolverDef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggers: Option<MemberChanges<Trigger>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change<T> {
    pub from: T,
    pub to: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberChanges<T> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<T>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changed: Vec<MemberChange<T>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberChange<T> {
    pub name: String,
    pub from: T,
    pub to: T,
}

/// A named entity member that can be compared across revisions.
trait Member: Clone {
    fn name(&self) -> &str;

    fn same(&self, other: &Self) -> bool;
}

impl Member for Attribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn same(&self, other: &Self) -> bool {
        self.ty == other.ty && self.nullable == other.nullable
    }
}

impl Member for Index {
    fn name(&self) -> &str {
        &self.name
    }

    fn same(&self, other: &Self) -> bool {
        self.effective_ty() == other.effective_ty() && self.minimum_score == other.minimum_score
    }
}

impl Member for ResolverDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn same(&self, other: &Self) -> bool {
        self.expression == other.expression
    }
}

impl Member for Trigger {
    fn name(&self) -> &str {
        &self.name
    }

    fn same(&self, other: &Self) -> bool {
        self.event == other.event && self.trigger == other.trigger
    }
}

impl SchemaDiff {
    /// Compares `current` against `proposed`.
    pub fn compute(current: &Schema, proposed: &Schema) -> SchemaDiff {
        let mut new_tables = proposed
            .entities()
            .filter(|entity| !current.contains(&entity.name))
            .map(|entity| entity.name.clone())
            .collect::<Vec<_>>();

        let mut removed_tables = current
            .entities()
            .filter(|entity| !proposed.contains(&entity.name))
            .map(|entity| entity.name.clone())
            .collect::<Vec<_>>();

        let mut changed_tables = proposed
            .entities()
            .filter_map(|to| {
                let from = current.entity(&to.name)?;
                TableDiff::compute(from, to)
            })
            .collect::<Vec<_>>();

        new_tables.sort();
        removed_tables.sort();
        changed_tables.sort_by(|a, b| a.name.cmp(&b.name));

        SchemaDiff {
            new_tables,
            removed_tables,
            changed_tables,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.new_tables.is_empty() && self.removed_tables.is_empty() && self.changed_tables.is_empty()
    }

    pub fn table(&self, name: &str) -> Option<&TableDiff> {
        self.changed_tables.iter().find(|table| table.name == name)
    }
}

impl TableDiff {
    fn compute(from: &Entity, to: &Entity) -> Option<TableDiff> {
        let partition = (from.partition != to.partition).then(|| Change {
            from: from.partition.clone(),
            to: to.partition.clone(),
        });

        let identifier = (from.identifier != to.identifier).then(|| Change {
            from: from.identifier.clone(),
            to: to.identifier.clone(),
        });

        let diff = TableDiff {
            name: to.name.clone(),
            partition,
            identifier,
            attributes: diff_members(&from.attributes, &to.attributes),
            indexes: diff_members(&from.indexes, &to.indexes),
            resolvers: diff_members(&from.resolvers, &to.resolvers),
            triggers: diff_members(&from.triggers, &to.triggers),
        };

        (!diff.is_empty()).then_some(diff)
    }

    pub fn is_empty(&self) -> bool {
        self.partition.is_none()
            && self.identifier.is_none()
            && self.attributes.is_none()
            && self.indexes.is_none()
            && self.resolvers.is_none()
            && self.triggers.is_none()
    }
}

fn diff_members<T: Member>(from: &[T], to: &[T]) -> Option<MemberChanges<T>> {
    let by_name = |members: &[T]| -> IndexMap<String, T> {
        members
            .iter()
            .filter(|member| !member.name().is_empty())
            .map(|member| (member.name().to_string(), member.clone()))
            .collect()
    };

    let from = by_name(from);
    let to = by_name(to);

    let mut added = vec![];
    let mut changed = vec![];

    for (name, member) in &to {
        match from.get(name) {
            Some(prev) if !prev.same(member) => changed.push(MemberChange {
                name: name.clone(),
                from: prev.clone(),
                to: member.clone(),
            }),
            Some(_) => {}
            None => added.push(member.clone()),
        }
    }

    let mut removed = from
        .keys()
        .filter(|name| !to.contains_key(*name))
        .cloned()
        .collect::<Vec<_>>();

    if added.is_empty() && removed.is_empty() && changed.is_empty() {
        return None;
    }

    added.sort_by(|a: &T, b: &T| a.name().cmp(b.name()));
    removed.sort();
    changed.sort_by(|a, b| a.name.cmp(&b.name));

    Some(MemberChanges {
        added,
        removed,
        changed,
    })
}

fn summary<T: Member>(changes: &MemberChanges<T>) -> String {
    let mut parts = vec![];
    parts.extend(changes.added.iter().map(|member| format!("+{}", member.name())));
    parts.extend(changes.removed.iter().map(|name| format!("-{name}")));
    parts.extend(changes.changed.iter().map(|change| format!("~{}", change.name)));
    parts.join(" ")
}

impl fmt::Display for SchemaDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no differences\n");
        }

        for name in &self.new_tables {
            writeln!(f, "+ {name}")?;
        }

        for name in &self.removed_tables {
            writeln!(f, "- {name}")?;
        }

        for table in &self.changed_tables {
            writeln!(f, "~ {}", table.name)?;

            if let Some(change) = &table.partition {
                writeln!(f, "    partition: {:?} -> {:?}", change.from, change.to)?;
            }
            if let Some(change) = &table.identifier {
                writeln!(f, "    identifier: {} -> {}", change.from.name, change.to.name)?;
            }
            if let Some(changes) = &table.attributes {
                writeln!(f, "    attributes: {}", summary(changes))?;
            }
            if let Some(changes) = &table.indexes {
                writeln!(f, "    indexes: {}", summary(changes))?;
            }
            if let Some(changes) = &table.resolvers {
                writeln!(f, "    resolvers: {}", summary(changes))?;
            }
            if let Some(changes) = &table.triggers {
                writeln!(f, "    triggers: {}", summary(changes))?;
            }
        }

        Ok(())
    }
}
