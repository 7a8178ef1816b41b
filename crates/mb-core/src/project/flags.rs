use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// How a projection travels and what it affects
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ProjectFlags: u16 {
        /// Continue past the target
        const THRU = 0x0001;
        /// Affect every cell along the path
        const BEAM = 0x0002;
        /// Stop at the first occupied cell
        const STOP = 0x0004;
        /// Send no visuals
        const HIDE = 0x0008;
        /// Start at the target instead of the source
        const JUMP = 0x0010;
        /// Affect terrain
        const GRID = 0x0020;
        /// Affect objects
        const ITEM = 0x0040;
        /// Affect monsters and players
        const KILL = 0x0080;
    }
}

impl ProjectFlags {
    /// Parse a comma separated list such as "grid,item,kill"
    pub fn parse_list(list: &str) -> Option<Self> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .try_fold(Self::empty(), |acc, name| {
                Self::from_name(&name.to_ascii_uppercase()).map(|f| acc | f)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(
            ProjectFlags::parse_list("grid, item,KILL"),
            Some(ProjectFlags::GRID | ProjectFlags::ITEM | ProjectFlags::KILL)
        );
        assert_eq!(ProjectFlags::parse_list(""), Some(ProjectFlags::empty()));
        assert_eq!(ProjectFlags::parse_list("grid,bogus"), None);
    }
}
