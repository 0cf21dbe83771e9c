//! Content registry: topic modules, clinical cases, and question banks.
//!
//! Built once at startup and only read afterwards. Sessions borrow their
//! question bank from here, so the registry must outlive them.

use std::collections::HashMap;

use anyhow::Result;

use crate::content;
use crate::model::{CaseVignette, ModulePayload, QuestionBank};

/// Read-only lookup from identifiers to display payloads.
#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    modules: Vec<ModulePayload>,
    cases: Vec<CaseVignette>,
    banks: Vec<QuestionBank>,
    module_index: HashMap<String, usize>,
    case_index: HashMap<String, usize>,
    bank_index: HashMap<String, usize>,
}

impl ContentRegistry {
    /// Registry populated from the embedded course content.
    pub fn builtin() -> Result<Self> {
        let registry = Self::from_parts(
            content::builtin_modules()?,
            content::builtin_cases()?,
            content::builtin_banks()?,
        )?;
        tracing::debug!(
            modules = registry.modules.len(),
            cases = registry.cases.len(),
            banks = registry.banks.len(),
            "content registry loaded"
        );
        Ok(registry)
    }

    /// Build a registry from explicit content.
    ///
    /// Fails on duplicate module, case, or bank identifiers and on modules
    /// that link to unknown cases.
    pub fn from_parts(
        modules: Vec<ModulePayload>,
        cases: Vec<CaseVignette>,
        banks: Vec<QuestionBank>,
    ) -> Result<Self> {
        let module_index = index_unique(modules.iter().map(|m| m.id.as_str()), "module")?;
        let case_index = index_unique(cases.iter().map(|c| c.id.as_str()), "case")?;
        let bank_index = index_unique(banks.iter().map(|b| b.topic()), "question bank")?;

        for m in &modules {
            if let Some(missing) = m.case_ids.iter().find(|id| !case_index.contains_key(*id)) {
                anyhow::bail!("module '{}' links to unknown case '{missing}'", m.id);
            }
        }

        Ok(Self {
            modules,
            cases,
            banks,
            module_index,
            case_index,
            bank_index,
        })
    }

    /// Add or replace a question bank. Intended for startup, before any
    /// session borrows from the registry.
    pub fn register_bank(&mut self, bank: QuestionBank) {
        match self.bank_index.get(bank.topic()) {
            Some(&i) => {
                tracing::warn!(topic = bank.topic(), "replacing registered question bank");
                self.banks[i] = bank;
            }
            None => {
                tracing::debug!(topic = bank.topic(), "registering question bank");
                self.bank_index
                    .insert(bank.topic().to_string(), self.banks.len());
                self.banks.push(bank);
            }
        }
    }

    pub fn get_module(&self, topic_id: &str) -> Option<&ModulePayload> {
        self.module_index.get(topic_id).map(|&i| &self.modules[i])
    }

    pub fn get_case(&self, case_id: &str) -> Option<&CaseVignette> {
        self.case_index.get(case_id).map(|&i| &self.cases[i])
    }

    pub fn get_bank(&self, topic_id: &str) -> Option<&QuestionBank> {
        self.bank_index.get(topic_id).map(|&i| &self.banks[i])
    }

    pub fn has_quiz(&self, topic_id: &str) -> bool {
        self.bank_index.contains_key(topic_id)
    }

    /// Modules in registration order.
    pub fn modules(&self) -> &[ModulePayload] {
        &self.modules
    }

    /// Cases in registration order.
    pub fn cases(&self) -> &[CaseVignette] {
        &self.cases
    }

    /// Question banks in registration order.
    pub fn banks(&self) -> &[QuestionBank] {
        &self.banks
    }

    /// Topics that have a question bank.
    pub fn quiz_topics(&self) -> impl Iterator<Item = &str> {
        self.banks.iter().map(|b| b.topic())
    }
}

fn index_unique<'a>(
    ids: impl Iterator<Item = &'a str>,
    kind: &str,
) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::new();
    for (i, id) in ids.enumerate() {
        if index.insert(id.to_string(), i).is_some() {
            anyhow::bail!("duplicate {kind} id: {id}");
        }
    }
    Ok(index)
}
