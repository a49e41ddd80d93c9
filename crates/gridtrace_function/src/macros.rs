//! Boilerplate for operators that explain through their recorded trace.

/// Implements [`Explainable`](crate::Explainable) through
/// [`rules::explain_traced`](crate::rules::explain_traced) and
/// [`Function`](crate::Function) by cloning with a fresh subject.
///
/// The type must be `Clone` and keep its identity in a `subject` field.
/// The calling crate must depend on `gridtrace_explain` and `gridtrace_part`.
#[macro_export]
macro_rules! traced_function {
    ($ty:ty) => {
        impl $crate::Explainable for $ty {
            fn explain(
                &self,
                run: &$crate::Evaluation,
                part: &::gridtrace_part::Part,
                factory: &mut ::gridtrace_explain::NodeFactory,
            ) -> ::gridtrace_explain::NodeId {
                $crate::rules::explain_traced(self, run, part, factory)
            }
        }

        impl $crate::Function for $ty {
            fn duplicate(&self) -> Box<dyn $crate::Function> {
                Box::new(Self {
                    subject: ::gridtrace_part::SubjectId::fresh(),
                    ..self.clone()
                })
            }
        }
    };
}
