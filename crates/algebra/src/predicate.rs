use std::fmt;
use std::rc::Rc;
use wat_types::Record;

#[derive(Clone)]
pub struct Predicate(Rc<dyn Fn(&Record) -> bool>);

impl Predicate {
    pub fn new(f: impl Fn(&Record) -> bool + 'static) -> Self {
        Predicate(Rc::new(f))
    }

    pub fn test(&self, record: &Record) -> bool {
        (self.0)(record)
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Predicate {}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate(..)")
    }
}
