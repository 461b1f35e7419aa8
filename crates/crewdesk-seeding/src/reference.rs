//! The `${collection[index].field}` reference grammar.
//!
//! References name a previously seeded record by zero-based position in its
//! collection. The grammar is collection name, integer index in brackets,
//! then a field name; nothing else. Malformed expressions are parse errors,
//! never silently treated as literals.

use std::fmt;

use nom::{
	IResult, Parser,
	bytes::complete::{tag, take_while1},
	character::complete::{char, digit1},
	combinator::{all_consuming, map_res},
	sequence::{delimited, preceded},
};

use crate::error::{SeedingError, SeedingResult};

/// A parsed reference to the field of an earlier seed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRef {
	/// Collection the referenced record belongs to.
	pub collection: String,
	/// Zero-based position within the collection.
	pub index: usize,
	/// Field of the referenced record ("id" for the generated identifier).
	pub field: String,
}

impl fmt::Display for SeedRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "${{{}[{}].{}}}", self.collection, self.index, self.field)
	}
}

/// Whether a string value is a reference expression.
pub fn looks_like_reference(value: &str) -> bool {
	value.starts_with("${")
}

fn identifier(input: &str) -> IResult<&str, &str> {
	take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_').parse(input)
}

fn index(input: &str) -> IResult<&str, usize> {
	map_res(digit1, str::parse::<usize>).parse(input)
}

fn seed_ref(input: &str) -> IResult<&str, SeedRef> {
	let (input, collection) = preceded(tag("${"), identifier).parse(input)?;
	let (input, index) = delimited(char('['), index, char(']')).parse(input)?;
	let (input, field) = delimited(char('.'), identifier, char('}')).parse(input)?;
	Ok((
		input,
		SeedRef {
			collection: collection.to_string(),
			index,
			field: field.to_string(),
		},
	))
}

/// Parse a full reference expression.
pub fn parse_reference(expr: &str) -> SeedingResult<SeedRef> {
	match all_consuming(seed_ref).parse(expr) {
		Ok((_, reference)) => Ok(reference),
		Err(_) => Err(SeedingError::Parse(format!(
			"invalid reference expression '{}'",
			expr
		))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_parse_id_reference() {
		let reference = parse_reference("${roles[0].id}").unwrap();
		assert_eq!(reference.collection, "roles");
		assert_eq!(reference.index, 0);
		assert_eq!(reference.field, "id");
	}

	#[rstest]
	fn test_parse_field_reference() {
		let reference = parse_reference("${organisations[12].domain}").unwrap();
		assert_eq!(reference.collection, "organisations");
		assert_eq!(reference.index, 12);
		assert_eq!(reference.field, "domain");
	}

	#[rstest]
	#[case("${roles[0]}")]
	#[case("${roles.id}")]
	#[case("${roles[0].id} extra")]
	#[case("${roles[-1].id}")]
	#[case("${roles[one].id}")]
	#[case("${[0].id}")]
	#[case("${roles[0].}")]
	#[case("$roles[0].id")]
	#[case("")]
	fn test_malformed_expressions_are_rejected(#[case] expr: &str) {
		assert!(matches!(
			parse_reference(expr),
			Err(SeedingError::Parse(_))
		));
	}

	#[rstest]
	fn test_display_round_trip() {
		let reference = parse_reference("${users[3].email}").unwrap();
		assert_eq!(reference.to_string(), "${users[3].email}");
	}

	#[rstest]
	fn test_looks_like_reference() {
		assert!(looks_like_reference("${roles[0].id}"));
		assert!(!looks_like_reference("plain text"));
		assert!(!looks_like_reference("prefix ${not-at-start}"));
	}
}
