/// The declared worst-case cost of filtering a constraint, in terms of the number of its
/// variables. Lower is cheaper; the complexity-ordered agendas filter cheaper constraints first.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Complexity(pub u32);

impl Complexity {
    pub const CONSTANT: Complexity = Complexity(0);
    pub const LOGARITHMIC: Complexity = Complexity(1);
    pub const LINEAR: Complexity = Complexity(2);
    pub const LINEARITHMIC: Complexity = Complexity(3);
    pub const QUADRATIC: Complexity = Complexity(4);
    pub const CUBIC: Complexity = Complexity(5);
}

impl Default for Complexity {
    fn default() -> Self {
        Complexity::LINEAR
    }
}
