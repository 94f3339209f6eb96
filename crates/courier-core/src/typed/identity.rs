//! Identity bridge - adapter と包まれた Handler を同一視する
//!
//! adapter は実行時には別オブジェクトですが、registry の登録・解除・重複排除では
//! 「同じ登録者」として扱われる必要があります。
//!
//! # 仕組み
//! - 全ての `HandlerRef` は `HandlerKey` を持つ
//! - 素の Handler: `Handler::identity()` があればそれ、なければインスタンスのアドレス
//! - adapter: 包んでいる `HandlerRef` の key をそのまま返す（何段ネストしても同じ）
//! - `PartialEq` / `Hash` は key だけを見る。key 同士の比較なので対称性は自明

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::handler::HandlerRef;
use super::message::Message;

/// HandlerKey は registry での同一性
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HandlerKey {
    /// インスタンスの同一性（共有されたアロケーションのアドレス）
    Instance(usize),
    /// 値としての同一性（Handler が自分で名乗る）
    Named(Cow<'static, str>),
}

impl HandlerKey {
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Named(name.into())
    }

    pub(crate) fn of_instance<P: ?Sized>(ptr: *const P) -> Self {
        Self::Instance(ptr.cast::<()>() as usize)
    }
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerKey::Instance(addr) => write!(f, "instance@{addr:#x}"),
            HandlerKey::Named(name) => write!(f, "{name}"),
        }
    }
}

// メッセージ型が違っても比較できる（Handler<Ping> と Widen した Handler<Signal> など）
impl<A: Message, B: Message> PartialEq<HandlerRef<B>> for HandlerRef<A> {
    fn eq(&self, other: &HandlerRef<B>) -> bool {
        self.key() == other.key()
    }
}

impl<T: Message> Eq for HandlerRef<T> {}

impl<T: Message> Hash for HandlerRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::fixtures::{Ping, Pong, Recorder, Signal};
    use rstest::rstest;
    use std::collections::HashSet;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[derive(Debug, Clone, Copy)]
    enum Wrap {
        Widen,
        NarrowStrict,
        NarrowTolerant,
    }

    #[rstest]
    #[case::widen(Wrap::Widen)]
    #[case::narrow_strict(Wrap::NarrowStrict)]
    #[case::narrow_tolerant(Wrap::NarrowTolerant)]
    fn adapters_are_equal_to_the_wrapped_handler(#[case] wrap: Wrap) {
        let ping_handler = HandlerRef::<Ping>::new(Recorder::new());
        let signal_handler = HandlerRef::<Signal>::new(Recorder::new());

        let (adapter_key, wrapped_key, adapter_hash, wrapped_hash, both_ways) = match wrap {
            Wrap::Widen => {
                let adapter = signal_handler.widen::<Ping>();
                (
                    adapter.key(),
                    signal_handler.key(),
                    hash_of(&adapter),
                    hash_of(&signal_handler),
                    adapter == signal_handler && signal_handler == adapter,
                )
            }
            Wrap::NarrowStrict => {
                let adapter = ping_handler.narrow_strict::<Signal>();
                (
                    adapter.key(),
                    ping_handler.key(),
                    hash_of(&adapter),
                    hash_of(&ping_handler),
                    adapter == ping_handler && ping_handler == adapter,
                )
            }
            Wrap::NarrowTolerant => {
                let adapter = ping_handler.narrow_tolerant::<Signal>();
                (
                    adapter.key(),
                    ping_handler.key(),
                    hash_of(&adapter),
                    hash_of(&ping_handler),
                    adapter == ping_handler && ping_handler == adapter,
                )
            }
        };

        assert_eq!(adapter_key, wrapped_key);
        assert_eq!(adapter_hash, wrapped_hash);
        assert!(both_ways);
    }

    #[test]
    fn nested_adapters_keep_the_innermost_identity() {
        let pong_handler = HandlerRef::<Pong>::new(Recorder::new());

        // Pong -> Signal (narrow) -> Pong (widen) -> Signal (narrow)
        let nested = pong_handler
            .narrow_tolerant::<Signal>()
            .widen::<Pong>()
            .narrow_strict::<Signal>();

        assert!(nested == pong_handler);
        assert!(pong_handler == nested);
        assert_eq!(hash_of(&nested), hash_of(&pong_handler));
    }

    #[test]
    fn distinct_handlers_are_not_equal() {
        let first = HandlerRef::<Ping>::new(Recorder::new());
        let second = HandlerRef::<Ping>::new(Recorder::new());

        assert!(first != second);
        assert!(first.narrow_strict::<Signal>() != second);
    }

    #[test]
    fn named_identity_is_value_equality() {
        let first = HandlerRef::<Ping>::new(Recorder::named("bell"));
        let second = HandlerRef::<Signal>::new(Recorder::named("bell"));

        assert!(first == second);
        assert!(first.narrow_tolerant::<Signal>() == second.widen::<Ping>());
        assert_eq!(first.key().to_string(), "bell");
    }

    #[test]
    fn hash_set_deduplicates_adapters() {
        let signal_handler = HandlerRef::<Signal>::new(Recorder::new());
        let mut set = HashSet::new();
        set.insert(signal_handler.key());
        set.insert(signal_handler.widen::<Ping>().key());
        set.insert(signal_handler.widen::<Pong>().key());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn instance_key_displays_an_address() {
        let handler = HandlerRef::<Ping>::new(Recorder::new());
        assert!(handler.key().to_string().starts_with("instance@0x"));
    }
}
