//! Declarative field tables for record types.

/// Implement [`Walk`](crate::core::node::Walk) for a struct by listing its
/// fields in declaration order.
///
/// Fields after `restricted:` are reported to the walk but never opened for
/// mutation. Type parameters may follow the name (`Wrapper<T> { .. }`); each
/// one gets a `Walk` bound. Lifetimes and where-clauses are not accepted, so
/// implement `Walk` by hand for those.
///
/// ```
/// use trimwalk::walk_record;
///
/// struct Account {
///     owner: String,
///     balance: i64,
///     api_key: String,
/// }
///
/// walk_record!(Account { owner, balance; restricted: api_key });
///
/// let mut account = Account {
///     owner: " ada ".to_string(),
///     balance: 10,
///     api_key: " secret ".to_string(),
/// };
/// trimwalk::trim_all(&mut account);
/// assert_eq!(account.owner, "ada");
/// assert_eq!(account.api_key, " secret ");
/// ```
#[macro_export]
macro_rules! walk_record {
    ($name:ident $(< $($gen:ident),+ $(,)? >)? {
        $($field:ident),* $(,)? $(; restricted: $($hidden:ident),+ $(,)?)?
    }) => {
        impl $(< $($gen: $crate::core::node::Walk),+ >)? $crate::core::node::Walk
            for $name $(< $($gen),+ >)?
        {
            fn node(&mut self) -> $crate::core::node::Node<'_> {
                $crate::core::node::Node::Record(vec![
                    $($crate::core::node::Field::mutable(stringify!($field), &mut self.$field),)*
                    $($($crate::core::node::Field::restricted(stringify!($hidden)),)+)?
                ])
            }
        }
    };
}
