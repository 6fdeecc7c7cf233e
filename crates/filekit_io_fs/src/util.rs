use globset::{Glob, GlobMatcher};
use regex::Regex;

use crate::spec::{EnumWalkPatternMode, WalkTreeError};

////////////////////////////////////////////////////////////////////////////////
// #region PatternMatching

#[derive(Debug, Clone)]
pub(crate) enum TypeWalkPatternSeq {
    Literal(Vec<String>),
    Glob(Vec<GlobMatcher>),
    Regex(Vec<Regex>),
}

impl TypeWalkPatternSeq {
    fn is_match(&self, value: &str) -> bool {
        match self {
            Self::Literal(l_pats) => l_pats.iter().any(|p| value.contains(p.as_str())),
            Self::Glob(l_pats) => l_pats.iter().any(|p| p.is_match(value)),
            Self::Regex(l_pats) => l_pats.iter().any(|p| p.is_match(value)),
        }
    }
}

/// Compiled include/exclude basename patterns for one walk call.
#[derive(Debug, Clone, Default)]
pub(crate) struct SpecWalkPatterns {
    pub(crate) patterns_include_files: Option<TypeWalkPatternSeq>,
    pub(crate) patterns_exclude_files: Option<TypeWalkPatternSeq>,
}

impl SpecWalkPatterns {
    pub(crate) fn from_raw(
        patterns_include_files: Option<&[String]>,
        patterns_exclude_files: Option<&[String]>,
        rule_pattern: EnumWalkPatternMode,
    ) -> Result<Self, WalkTreeError> {
        Ok(Self {
            patterns_include_files: _compile(patterns_include_files, rule_pattern)?,
            patterns_exclude_files: _compile(patterns_exclude_files, rule_pattern)?,
        })
    }

    /// Whether a file basename is rejected by the include/exclude rules.
    ///
    /// An absent include list accepts everything; an absent exclude list
    /// rejects nothing.
    pub(crate) fn should_exclude(&self, name_file: &str) -> bool {
        if let Some(patterns_include) = &self.patterns_include_files
            && !patterns_include.is_match(name_file)
        {
            return true;
        }
        if let Some(patterns_exclude) = &self.patterns_exclude_files
            && patterns_exclude.is_match(name_file)
        {
            return true;
        }
        false
    }
}

fn _compile(
    patterns: Option<&[String]>,
    rule_pattern: EnumWalkPatternMode,
) -> Result<Option<TypeWalkPatternSeq>, WalkTreeError> {
    let Some(patterns) = patterns else {
        return Ok(None);
    };
    if patterns.is_empty() {
        return Ok(None);
    }

    let compiled = match rule_pattern {
        EnumWalkPatternMode::Literal => TypeWalkPatternSeq::Literal(patterns.to_vec()),
        EnumWalkPatternMode::Glob => {
            let mut l_glob = Vec::with_capacity(patterns.len());
            for pattern in patterns {
                let matcher = Glob::new(pattern)
                    .map_err(|e| {
                        WalkTreeError::InvalidPattern(format!("Invalid walk pattern: {e}"))
                    })?
                    .compile_matcher();
                l_glob.push(matcher);
            }
            TypeWalkPatternSeq::Glob(l_glob)
        }
        EnumWalkPatternMode::Regex => {
            let mut l_regex = Vec::with_capacity(patterns.len());
            for pattern in patterns {
                let regex = Regex::new(pattern).map_err(|e| {
                    WalkTreeError::InvalidPattern(format!("Invalid walk pattern: {e}"))
                })?;
                l_regex.push(regex);
            }
            TypeWalkPatternSeq::Regex(l_regex)
        }
    };
    Ok(Some(compiled))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
