//! Incremental, confirmed assembly of the design document.
//!
//! Each draft is bounded to a soft size band so that every confirmation cycle
//! stays reviewable. Oversized drafts are cut at a word boundary; the cut text
//! becomes the next pending chunk of the same module once the head has been
//! confirmed.

use jiff::Timestamp;
use log::{debug, warn};

use crate::{
    error::{Result, WorkflowError},
    models::{
        DesignModule, DocumentDraft, DocumentSection, PendingSection, RevisionRequest,
        SectionConfirmation, SectionOverflow,
    },
};

/// Lower end of the section size band, in words.
pub const MIN_SECTION_WORDS: usize = 200;
/// Upper end of the section size band, in words.
pub const MAX_SECTION_WORDS: usize = 300;

/// Mediates every write to a [`DocumentDraft`].
pub struct SectionAssembler<'a> {
    draft: &'a mut DocumentDraft,
}

impl<'a> SectionAssembler<'a> {
    pub fn new(draft: &'a mut DocumentDraft) -> Self {
        Self { draft }
    }

    /// First module in canonical order without a complete section.
    pub fn next_module(&self) -> Option<DesignModule> {
        next_module(self.draft)
    }

    /// Stage a draft for `module` as the pending section.
    ///
    /// # Errors
    ///
    /// - `SectionPending` if another chunk still awaits confirmation
    /// - `DocumentComplete` if every module is already confirmed
    /// - `SectionOutOfOrder` if `module` is not the next module
    /// - `CollaboratorFailure` if the draft is blank
    pub fn propose_section(
        &mut self,
        module: DesignModule,
        draft_text: &str,
    ) -> Result<PendingSection> {
        self.check_slot(module)?;
        let text = draft_text.trim();
        if text.is_empty() {
            return Err(WorkflowError::collaborator(format!(
                "draft for '{}' is empty",
                module.title()
            )));
        }

        let continuation = self.draft.section(module).is_some();
        let pending = bound_section(module, text, continuation);
        self.draft.pending = Some(pending.clone());
        Ok(pending)
    }

    /// Verify that a draft for `module` would be accepted right now, without
    /// staging anything.
    pub fn check_slot(&self, module: DesignModule) -> Result<()> {
        if let Some(pending) = &self.draft.pending {
            return Err(WorkflowError::SectionPending {
                module: pending.module,
            });
        }
        let expected = self
            .next_module()
            .ok_or(WorkflowError::DocumentComplete { proposed: module })?;
        if module != expected {
            return Err(WorkflowError::SectionOutOfOrder {
                expected,
                proposed: module,
            });
        }
        Ok(())
    }

    /// Append the pending chunk for `module` to the document.
    pub fn confirm_section(&mut self, module: DesignModule) -> Result<SectionConfirmation> {
        let pending = self.take_pending(module)?;
        let complete = pending.remainder.is_none();
        let now = Timestamp::now();

        match self.draft.sections.iter_mut().find(|s| s.module == module) {
            Some(section) => {
                section.body.push_str("\n\n");
                section.body.push_str(&pending.text);
                section.complete = complete;
                section.confirmed_at = now;
            }
            None => self.draft.sections.push(DocumentSection {
                module,
                body: pending.text,
                complete,
                confirmed_at: now,
            }),
        }

        match pending.remainder {
            Some(rest) => {
                let next = bound_section(module, &rest, true);
                debug!(
                    "Confirmed chunk of '{}', continuation of {} words pending",
                    module.title(),
                    next.word_count
                );
                self.draft.pending = Some(next.clone());
                Ok(SectionConfirmation::Continued { next })
            }
            None => {
                debug!("Confirmed section '{}'", module.title());
                Ok(SectionConfirmation::Appended { module })
            }
        }
    }

    /// Discard the pending chunk for `module`; the slot must be re-proposed.
    pub fn reject_section(
        &mut self,
        module: DesignModule,
        feedback: &str,
    ) -> Result<RevisionRequest> {
        self.take_pending(module)?;
        debug!("Rejected section '{}'", module.title());
        Ok(RevisionRequest {
            module,
            feedback: feedback.trim().to_string(),
        })
    }

    fn take_pending(&mut self, module: DesignModule) -> Result<PendingSection> {
        match self.draft.pending.take() {
            Some(pending) if pending.module == module => Ok(pending),
            other => {
                self.draft.pending = other;
                Err(WorkflowError::NoPendingSection { module })
            }
        }
    }
}

pub(crate) fn next_module(draft: &DocumentDraft) -> Option<DesignModule> {
    DesignModule::ALL
        .into_iter()
        .find(|module| !draft.section(*module).is_some_and(|s| s.complete))
}

/// Count words the way the size band measures them.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Byte offset where the `n`th (0-based) word starts.
fn nth_word_start(text: &str, n: usize) -> Option<usize> {
    let mut in_word = false;
    let mut count = 0;
    for (index, ch) in text.char_indices() {
        if ch.is_whitespace() {
            in_word = false;
        } else if !in_word {
            if count == n {
                return Some(index);
            }
            count += 1;
            in_word = true;
        }
    }
    None
}

fn bound_section(module: DesignModule, text: &str, continuation: bool) -> PendingSection {
    let words = word_count(text);
    let cut = if words > MAX_SECTION_WORDS {
        nth_word_start(text, MAX_SECTION_WORDS)
    } else {
        None
    };

    match cut {
        Some(offset) => {
            warn!(
                "Draft for '{}' has {} words, above the {} word band; splitting",
                module.title(),
                words,
                MAX_SECTION_WORDS
            );
            PendingSection {
                module,
                text: text[..offset].trim_end().to_string(),
                word_count: MAX_SECTION_WORDS,
                overflow: Some(SectionOverflow {
                    word_count: words,
                    limit: MAX_SECTION_WORDS,
                }),
                remainder: Some(text[offset..].trim().to_string()),
                continuation,
            }
        }
        None => {
            if words < MIN_SECTION_WORDS {
                debug!(
                    "Draft for '{}' has {} words, below the {} word band",
                    module.title(),
                    words,
                    MIN_SECTION_WORDS
                );
            }
            PendingSection {
                module,
                text: text.to_string(),
                word_count: words,
                overflow: None,
                remainder: None,
                continuation,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    fn permutations(items: &[DesignModule]) -> Vec<Vec<DesignModule>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut result = Vec::new();
        for (i, first) in items.iter().enumerate() {
            let mut rest = items.to_vec();
            rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, *first);
                result.push(tail);
            }
        }
        result
    }

    #[test]
    fn test_sections_append_in_canonical_order() {
        let mut draft = DocumentDraft::default();
        let mut assembler = SectionAssembler::new(&mut draft);
        for module in DesignModule::ALL {
            assembler.propose_section(module, &words(220)).unwrap();
            assert_eq!(
                assembler.confirm_section(module).unwrap(),
                SectionConfirmation::Appended { module }
            );
        }
        assert!(assembler.next_module().is_none());
        let order: Vec<DesignModule> = draft.sections.iter().map(|s| s.module).collect();
        assert_eq!(order, DesignModule::ALL.to_vec());
    }

    #[test]
    fn test_no_ordering_appends_out_of_sequence() {
        for ordering in permutations(&DesignModule::ALL) {
            let mut draft = DocumentDraft::default();
            let mut assembler = SectionAssembler::new(&mut draft);
            for module in &ordering {
                if assembler.propose_section(*module, &words(10)).is_ok() {
                    assembler.confirm_section(*module).unwrap();
                }
            }
            let appended: Vec<DesignModule> = draft.sections.iter().map(|s| s.module).collect();
            assert_eq!(appended, DesignModule::ALL[..appended.len()].to_vec());
            let mut unique = appended.clone();
            unique.dedup();
            assert_eq!(unique, appended, "duplicate section for {ordering:?}");
        }
    }

    #[test]
    fn test_out_of_order_proposal_is_rejected() {
        let mut draft = DocumentDraft::default();
        let mut assembler = SectionAssembler::new(&mut draft);
        let err = assembler
            .propose_section(DesignModule::DataFlow, "text")
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::SectionOutOfOrder {
                expected: DesignModule::Architecture,
                proposed: DesignModule::DataFlow,
            }
        ));
        assert!(draft.pending.is_none());
    }

    #[test]
    fn test_second_proposal_while_pending_is_rejected() {
        let mut draft = DocumentDraft::default();
        let mut assembler = SectionAssembler::new(&mut draft);
        assembler
            .propose_section(DesignModule::Architecture, "first")
            .unwrap();
        assert!(matches!(
            assembler.propose_section(DesignModule::Architecture, "second"),
            Err(WorkflowError::SectionPending { .. })
        ));
    }

    #[test]
    fn test_rejection_keeps_slot_open() {
        let mut draft = DocumentDraft::default();
        let mut assembler = SectionAssembler::new(&mut draft);
        assembler
            .propose_section(DesignModule::Architecture, "draft one")
            .unwrap();
        let revision = assembler
            .reject_section(DesignModule::Architecture, " too vague ")
            .unwrap();
        assert_eq!(revision.feedback, "too vague");
        assert_eq!(assembler.next_module(), Some(DesignModule::Architecture));
        assert!(draft.sections.is_empty());
        assert!(draft.pending.is_none());
    }

    #[test]
    fn test_confirm_without_pending() {
        let mut draft = DocumentDraft::default();
        let mut assembler = SectionAssembler::new(&mut draft);
        assert!(matches!(
            assembler.confirm_section(DesignModule::Architecture),
            Err(WorkflowError::NoPendingSection { .. })
        ));
    }

    #[test]
    fn test_blank_draft_is_collaborator_failure() {
        let mut draft = DocumentDraft::default();
        let mut assembler = SectionAssembler::new(&mut draft);
        assert!(matches!(
            assembler.propose_section(DesignModule::Architecture, "  \n "),
            Err(WorkflowError::CollaboratorFailure { .. })
        ));
    }

    #[test]
    fn test_oversized_draft_is_split_into_continuations() {
        let mut draft = DocumentDraft::default();
        let mut assembler = SectionAssembler::new(&mut draft);
        let pending = assembler
            .propose_section(DesignModule::Architecture, &words(650))
            .unwrap();
        assert_eq!(pending.word_count, MAX_SECTION_WORDS);
        assert_eq!(
            pending.overflow,
            Some(SectionOverflow {
                word_count: 650,
                limit: MAX_SECTION_WORDS
            })
        );
        assert!(pending.text.ends_with("w299"));

        let second = match assembler.confirm_section(DesignModule::Architecture).unwrap() {
            SectionConfirmation::Continued { next } => next,
            other => panic!("expected continuation, got {other:?}"),
        };
        assert!(second.continuation);
        assert!(second.text.starts_with("w300"));
        assert_eq!(second.word_count, MAX_SECTION_WORDS);

        let third = match assembler.confirm_section(DesignModule::Architecture).unwrap() {
            SectionConfirmation::Continued { next } => next,
            other => panic!("expected continuation, got {other:?}"),
        };
        assert_eq!(third.word_count, 50);
        assert!(third.overflow.is_none());
        assert_eq!(
            assembler.confirm_section(DesignModule::Architecture).unwrap(),
            SectionConfirmation::Appended {
                module: DesignModule::Architecture
            }
        );

        assert_eq!(draft.sections.len(), 1);
        assert!(draft.sections[0].complete);
        assert_eq!(word_count(&draft.sections[0].body), 650);
    }

    #[test]
    fn test_rejected_continuation_extends_existing_section() {
        let mut draft = DocumentDraft::default();
        let mut assembler = SectionAssembler::new(&mut draft);
        assembler
            .propose_section(DesignModule::Architecture, &words(310))
            .unwrap();
        assembler.confirm_section(DesignModule::Architecture).unwrap();
        assembler
            .reject_section(DesignModule::Architecture, "rewrite the tail")
            .unwrap();

        assert_eq!(assembler.next_module(), Some(DesignModule::Architecture));
        let retry = assembler
            .propose_section(DesignModule::Architecture, "revised tail")
            .unwrap();
        assert!(retry.continuation);
        assembler.confirm_section(DesignModule::Architecture).unwrap();

        assert_eq!(draft.sections.len(), 1);
        assert!(draft.sections[0].body.ends_with("revised tail"));
    }
}
