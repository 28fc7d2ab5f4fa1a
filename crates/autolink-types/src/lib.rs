pub mod autolink;
pub mod enrichment;
pub mod issue;
pub mod priority;
pub mod reference;

pub use autolink::{Autolink, AutolinkMap, ProviderReference, RefSet, SerializedAutolink};
pub use enrichment::{EnrichmentState, MaybeEnrichedAutolink, TokenizeFn};
pub use issue::{IssueOrPullRequest, IssueOrPullRequestState};
pub use priority::Priority;
pub use reference::{AutolinkKind, AutolinkReference, DynamicReference, NUM_TOKEN, OutputFormat, ParseFn, ReferenceScope, StaticReference};
