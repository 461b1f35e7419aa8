//! Revision state classification.

/// The database's recorded schema-revision state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionState {
	/// No revision recorded; the schema has never been migrated.
	Uninitialized,
	/// Exactly one head, the normal case.
	Converged(String),
	/// More than one head: a corrupt or conflicting migration history.
	Diverged(Vec<String>),
}

impl RevisionState {
	/// Classify a set of recorded heads.
	pub fn classify(heads: &[String]) -> Self {
		match heads {
			[] => Self::Uninitialized,
			[head] => Self::Converged(head.clone()),
			_ => Self::Diverged(heads.to_vec()),
		}
	}

	/// The single head, when converged.
	pub fn head(&self) -> Option<&str> {
		match self {
			Self::Converged(head) => Some(head),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_zero_heads_is_uninitialized() {
		assert_eq!(RevisionState::classify(&[]), RevisionState::Uninitialized);
	}

	#[rstest]
	fn test_one_head_is_converged() {
		let state = RevisionState::classify(&["0003_tasks".to_string()]);
		assert_eq!(state, RevisionState::Converged("0003_tasks".to_string()));
		assert_eq!(state.head(), Some("0003_tasks"));
	}

	#[rstest]
	fn test_multiple_heads_is_diverged() {
		let heads = vec!["0002_a".to_string(), "0003_b".to_string()];
		let state = RevisionState::classify(&heads);
		assert_eq!(state, RevisionState::Diverged(heads));
		assert_eq!(state.head(), None);
	}
}
