//! Horn port - アナウンスの出力先
//!
//! Cashier や OrderPrinter が「何が起きたか」を人に伝えるためのチャネル。

/// Horn は 1 行のアナウンスを受け取る
pub trait Horn: Send + Sync {
    fn say(&self, line: &str);
}
