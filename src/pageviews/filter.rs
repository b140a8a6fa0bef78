//! Selection of the records that we care about

use super::Record;
use crate::config::Config;
use std::sync::Arc;

/// Build the record filter
///
/// Only records from the configured language and project make it into the
/// view counts. Mobile records have been normalized by the parser, so they
/// are accepted alongside their desktop counterpart.
pub fn make_record_filter(config: Arc<Config>) -> impl FnMut(&Record) -> bool {
    move |record| {
        /// Reasons why a record could be discarded
        #[derive(Clone, Copy, Debug, Eq, PartialEq)]
        enum RejectCause {
            /// Record is about another language
            Language,

            /// Record is about another project (Wiktionary, Wikibooks...)
            Project,
        }

        // Determine if a record should be rejected
        let rejection = if *record.language != *config.language {
            Some(RejectCause::Language)
        } else if *record.project != *config.project {
            Some(RejectCause::Project)
        } else {
            None
        };

        // Report it in trace logs
        if let Some(rejection) = rejection {
            let cause = match rejection {
                RejectCause::Language => "it's not in the expected language",
                RejectCause::Project => "it's from another project",
            };
            log::trace!("Rejected {record:?} because {cause}");
        }

        // Propagate record filtering decision to the caller
        rejection.is_none()
    }
}
