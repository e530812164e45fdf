/// Declare a class type with its fields in order.
///
/// Evaluates to `xcl::Result<ClassType>`; a repeated field name is an error.
/// Without a factory the class is backed by [`Record`](crate::Record).
///
/// # Examples
///
/// ```rust
/// use xcl::{primitives, xcl_class};
///
/// let server = xcl_class!("Server" => {
///     "Port": primitives::integer(),
///     "Debug": primitives::boolean(),
/// })?;
/// assert_eq!(server.len(), 2);
///
/// let broken = xcl_class!("Server" => {
///     "Port": primitives::integer(),
///     "Port": primitives::integer(),
/// });
/// assert!(broken.is_err());
/// # Ok::<(), xcl::Error>(())
/// ```
#[macro_export]
macro_rules! xcl_class {
    ($name:expr => { $($field:literal : $ty:expr),* $(,)? }) => {
        $crate::xcl_class!($name, $crate::RecordFactory => { $($field : $ty),* })
    };

    ($name:expr, $factory:expr => { $($field:literal : $ty:expr),* $(,)? }) => {{
        let build = || -> $crate::Result<$crate::ClassType> {
            let class = $crate::ClassType::new($name, $factory);
            $(
                let class = class.with_field($field, $ty)?;
            )*
            Ok(class)
        };
        build()
    }};
}

#[cfg(test)]
mod tests {
    use crate::{primitives, Error, Native, Record};

    #[test]
    fn test_xcl_class_record() {
        let class = xcl_class!("Server" => {
            "Port": primitives::integer(),
            "Name": primitives::string(),
        })
        .unwrap();
        let names: Vec<_> = class.fields().map(|f| f.name()).collect();
        assert_eq!(names, vec!["Port", "Name"]);
        let host = class.construct(None).unwrap();
        assert!(host.as_any().downcast_ref::<Record>().is_some());
    }

    #[test]
    fn test_xcl_class_empty() {
        let class = xcl_class!("Empty" => {}).unwrap();
        assert!(class.is_empty());
    }

    #[test]
    fn test_xcl_class_custom_factory() {
        let class = xcl_class!("Fixed", |class: &crate::ClassType, _: Option<&crate::Value>| {
            let mut record = Record::for_class(class, None);
            record.set("Port", 443)?;
            Ok::<_, Error>(Box::new(record) as Box<dyn crate::HostObject>)
        } => {
            "Port": primitives::integer(),
        })
        .unwrap();
        let host = class.construct(None).unwrap();
        let port = class.field("Port").unwrap();
        assert_eq!(host.get_field(port), Ok(Native::Integer(443)));
    }

    #[test]
    fn test_xcl_class_duplicate() {
        let err = xcl_class!("Dup" => {
            "A": primitives::boolean(),
            "A": primitives::boolean(),
        })
        .unwrap_err();
        assert_eq!(err, Error::duplicate_field("Dup", "A"));
    }
}
