/// # Summary
/// 解析后的用户指令。
///
/// # Invariants
/// - 交易对参数已规范化为大写，周期参数保持原文交由路由层校验。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // 欢迎与帮助
    Start,
    // 列出监控中的交易对
    Coins,
    // 追加交易对
    Add(String),
    // 移除交易对
    Remove(String),
    // 切换周期
    SetTimeframe(String),
    // 参数数量或格式不符，附该指令的用法说明
    Malformed { usage: &'static str },
    // 无法识别的输入
    Unknown,
}

const ADD_USAGE: &str = "Usage: /add SYMBOL\nExample: /add BTC-USDT";
const REMOVE_USAGE: &str = "Usage: /remove SYMBOL\nExample: /remove BTC-USDT";
const TIMEFRAME_USAGE: &str = "Usage: /timeframe INTERVAL\nExample: /timeframe 15m";

impl Command {
    /// # Summary
    /// 从消息文本解析指令。
    ///
    /// # Logic
    /// 1. 按空白拆分，首段为指令名，群聊中的 `@botname` 后缀一并剥离。
    /// 2. 带参指令要求恰好一个参数，多参或缺参视为格式错误。
    /// 3. 交易对统一大写，周期统一交由路由层解析。
    ///
    /// # Arguments
    /// * `text`: 原始消息文本。
    ///
    /// # Returns
    /// 解析结果，永不失败。
    pub fn parse(text: &str) -> Command {
        let mut parts = text.split_whitespace();
        let Some(head) = parts.next() else {
            return Command::Unknown;
        };
        let name = head.split('@').next().unwrap_or(head);
        let args: Vec<&str> = parts.collect();

        match name {
            "/start" => Command::Start,
            "/coins" => Command::Coins,
            "/add" => match args.as_slice() {
                [symbol] => Command::Add(symbol.to_uppercase()),
                _ => Command::Malformed { usage: ADD_USAGE },
            },
            "/remove" => match args.as_slice() {
                [symbol] => Command::Remove(symbol.to_uppercase()),
                _ => Command::Malformed {
                    usage: REMOVE_USAGE,
                },
            },
            "/timeframe" => match args.as_slice() {
                [interval] => Command::SetTimeframe(interval.to_lowercase()),
                _ => Command::Malformed {
                    usage: TIMEFRAME_USAGE,
                },
            },
            _ => Command::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_commands() {
        assert_eq!(Command::parse("/start"), Command::Start);
        assert_eq!(Command::parse("/coins"), Command::Coins);
    }

    #[test]
    fn test_parse_strips_bot_mention() {
        assert_eq!(Command::parse("/coins@SigmaxBot"), Command::Coins);
        assert_eq!(
            Command::parse("/add@SigmaxBot sol-usdt"),
            Command::Add("SOL-USDT".to_string())
        );
    }

    #[test]
    fn test_parse_uppercases_symbols() {
        assert_eq!(
            Command::parse("/add btc-usdt"),
            Command::Add("BTC-USDT".to_string())
        );
        assert_eq!(
            Command::parse("/remove eth-usdt"),
            Command::Remove("ETH-USDT".to_string())
        );
    }

    #[test]
    fn test_parse_lowercases_timeframe() {
        assert_eq!(
            Command::parse("/timeframe 15M"),
            Command::SetTimeframe("15m".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        assert!(matches!(
            Command::parse("/add"),
            Command::Malformed { .. }
        ));
        assert!(matches!(
            Command::parse("/add BTC-USDT ETH-USDT"),
            Command::Malformed { .. }
        ));
        assert!(matches!(
            Command::parse("/timeframe"),
            Command::Malformed { .. }
        ));
    }

    #[test]
    fn test_parse_unknown_input() {
        assert_eq!(Command::parse("hello"), Command::Unknown);
        assert_eq!(Command::parse("/quux"), Command::Unknown);
        assert_eq!(Command::parse(""), Command::Unknown);
    }
}
