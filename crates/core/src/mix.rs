use crate::types::StyleNode;
use serde_json::{Map, Value};
use tracing::trace;

/// mix 参数的分类
///
/// 只有普通对象会参与合并，其余（null、布尔、数字、字符串、数组）一律跳过
#[derive(Debug, Clone, Copy)]
pub enum MixSource<'a> {
    Mapping(&'a Map<String, Value>),
    Skipped,
}

impl<'a> MixSource<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => MixSource::Mapping(map),
            _ => MixSource::Skipped,
        }
    }
}

/// 从左到右浅合并多个对象
///
/// 功能：
/// - 后者覆盖前者，已存在的键保持首次插入的位置
/// - 非对象参数被静默忽略，从不失败
/// - 不修改输入
pub fn mix<'a, I>(sources: I) -> Map<String, Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut mixed = Map::new();

    for (position, source) in sources.into_iter().enumerate() {
        match MixSource::classify(source) {
            MixSource::Mapping(map) => {
                for (key, value) in map {
                    mixed.insert(key.clone(), value.clone());
                }
            }
            MixSource::Skipped => {
                trace!(position, "skipping non-object mix source");
            }
        }
    }

    mixed
}

/// `mix` 的强类型版本，`None` 表示缺省参数
pub fn mix_nodes<'a, I>(sources: I) -> StyleNode
where
    I: IntoIterator<Item = Option<&'a StyleNode>>,
{
    let mut mixed = StyleNode::new();

    for node in sources.into_iter().flatten() {
        for (key, value) in node {
            mixed.insert(key.clone(), value.clone());
        }
    }

    mixed
}
