// ==========================================
// 零件日库存推演系统 - 零件别名归并规则
// ==========================================
// 职责: 定义排除 / 1对1归并 / 多对1归并 的规则表
// 红线: 规则以显式结构注入, 不做全局可变表;
//       应用顺序固定为 排除 → 1对1 → 多对1
// ==========================================
// 业务背景: 同一实体零件会以 "(free)" / "(supplied
// materials)" / "(xxxrework)" 等后缀变体出现在数据源中,
// 报表前必须归并到规范零件号。
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// 规则条目
// ==========================================
/// 1对1归并: alias 列并入(或改名为) canonical 列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRule {
    pub alias: String,
    pub canonical: String,
}

/// 多对1归并: aliases 各列依次并入 canonical 列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRule {
    pub canonical: String,
    pub aliases: Vec<String>,
}

// ==========================================
// AliasRules - 归并规则全集
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRules {
    /// 报表前整列移除的零件
    pub exclude: Vec<String>,
    /// 1对1归并(按表序应用)
    pub rename: Vec<RenameRule>,
    /// 多对1归并(按表序应用)
    pub merge: Vec<MergeRule>,
}

impl AliasRules {
    /// 空规则(推演结果原样交付)
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.exclude.is_empty() && self.rename.is_empty() && self.merge.is_empty()
    }

    pub fn rule_count(&self) -> usize {
        self.exclude.len() + self.rename.len() + self.merge.len()
    }

    /// 生产环境现行规则表
    ///
    /// 与既有报表口径一致; 规则引用的零件在某期数据中
    /// 不存在时按无操作处理(零件随期次出现与消失)。
    pub fn standard() -> Self {
        let exclude = [
            "DEJ-OR-FRT-01399",
            "出力定格電圧調整費(54.6V→52.8V)",
            "3073247220",
            "(BB)TBM48050E2-1M22",
            "(BA)TBM48050E2-1M22",
            "(C)TBM48050E2-1S22",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let rename = [
            ("3798D000000278-S(free)", "3798D000000278-S"),
            ("3798D000000225-S(free)", "3798D000000225-S"),
            ("3798D000000228-S(free)", "3798D000000228-S"),
            ("ESR-48/56L J-S(free)", "ESR-48/56L J-S"),
            ("ESBC200-CEA04(supplied materials)", "ESBC200-CEA04"),
            ("ESR-48/56C F-A(free)", "ESR-48/56C F-A"),
            ("ESAA75-CEA03(supplied materials)", "ESAA75-CEA03"),
            ("ESOF040-EAA01(supplied materials)", "ESOF040-EAA01"),
            ("3798D000000763-S(supplied materials)", "3798D000000763-S"),
            ("3798D000000762-S(supplied materials)", "3798D000000762-S"),
            ("3798D000000761-S(supplied materials)", "3798D000000761-S"),
            ("3798D000000760-S(supplied materials)", "3798D000000760-S"),
            ("3798D000000764-S(supplied materials)", "3798D000000764-S"),
            ("3798C000000642-S(supplied materials)", "3798C000000642-S"),
            ("3798D000000805-S(supplied materials)", "3798D000000805-S"),
            ("3798D000000806-S(supplied materials)", "3798D000000806-S"),
            ("3798Z00099AT-S(supplied materials)", "3798Z00099AT-S"),
            ("3798C000000620-S(supplied materials)", "3798C000000620-S"),
            ("3798C000000621-S(supplied materials)", "3798C000000621-S"),
            ("3798D000000315-S(free)", "3798D000000315-S"),
            ("ESAA75-CEA02(supplied materials)", "ESAA75-CEA02"),
            ("3377144600-S(free)", "3377144600-S"),
            ("3474179500(free)", "3474179500"),
        ]
        .iter()
        .map(|(alias, canonical)| RenameRule {
            alias: alias.to_string(),
            canonical: canonical.to_string(),
        })
        .collect();

        let merge = vec![
            merge_rule(
                "3798C000000622-S",
                &[
                    "3798C000000622-S(free)",
                    "3798C000000622-S(supplied materials)(free)",
                    "3798C000000622-S(supplied materials)",
                ],
            ),
            merge_rule(
                "3799906300-S",
                &[
                    "3799906300-S(free)",
                    "3799906300-S(supplied materials)(free)",
                ],
            ),
            merge_rule(
                "3799906200-S",
                &[
                    "3799906200-S(free)",
                    "3799906200-S(supplied materials)(free)",
                ],
            ),
            merge_rule(
                "ESBC200-CEA01",
                &[
                    "ESBC200-CEA01(supplied materials)",
                    "ESBC200-CEA02(ESBC200-CEA01rework)",
                    "ESBC200-CEA03(ESBC200-CEA01rework)",
                    "ESBC200-CEA04(ESBC200-CEA01rework)",
                    "ESBC200-CEA02(ESBC200-CEA01rework supplied materials)",
                    "ESBC200-CEA03(ESBC200-CEA01rework supplied materials)",
                    "ESBC200-CEA04(ESBC200-CEA01rework supplied materials)",
                ],
            ),
            merge_rule(
                "ESBC200-CEA02",
                &[
                    "ESBC200-CEA02(supplied materials)",
                    "ESBC200-CEA03(ESBC200-CEA02rework)",
                    "ESBC200-CEA04(ESBC200-CEA02rework)",
                    "ESBC200-CEA03(ESBC200-CEA02rework supplied materials)",
                    "ESBC200-CEA04(ESBC200-CEA02rework supplied materials)",
                ],
            ),
            merge_rule(
                "ESBC200-CEA03",
                &[
                    "ESBC200-CEA03(supplied materials)",
                    "ESBC200-CEA04(ESBC200-CEA03rework)",
                    "ESBC200-CEA04(ESBC200-CEA03rework supplied materials)",
                ],
            ),
            merge_rule(
                "ESBC200-CEA05",
                &[
                    "ESBC200-CEA01(ESBC200-CEA05rework)",
                    "ESBC200-CEA02(ESBC200-CEA05rework)",
                    "ESBC200-CEA03(ESBC200-CEA05rework)",
                    "ESBC200-CEA04(ESBC200-CEA05rework)",
                    "ESBC200-CEA01(ESBC200-CEA05rework supplied materials)",
                    "ESBC200-CEA02(ESBC200-CEA05rework supplied materials)",
                    "ESBC200-CEA03(ESBC200-CEA05rework supplied materials)",
                    "ESBC200-CEA04(ESBC200-CEA05rework supplied materials)",
                ],
            ),
            merge_rule(
                "ESAA75-CEA01",
                &[
                    "ESAA75-CEA01(supplied materials)",
                    "ESAA75-CEA02(ESAA75-CEA01rework supplied materials)",
                    "ESAA75-CEA02(ESAA75-CEA01rework)",
                ],
            ),
            merge_rule(
                "ESAA75-CEA04",
                &[
                    "ESAA75-CEA04(supplied materials)",
                    "ESAA75-CEA03(ESAA75-CEA04rework)",
                    "ESAA75-CEA03(ESAA75-CEA04rework supplied materials)",
                ],
            ),
            merge_rule(
                "ESAA75-CEA05",
                &[
                    "ESAA75-CEA05(supplied materials)",
                    "ESAA75-CEA03(ESAA75-CEA05rework)",
                    "ESAA75-CEA04(ESAA75-CEA05rework)",
                    "ESAA75-CEA03(ESAA75-CEA05rework supplied materials)",
                    "ESAA75-CEA04(ESAA75-CEA05rework supplied materials)",
                ],
            ),
        ];

        Self {
            exclude,
            rename,
            merge,
        }
    }
}

fn merge_rule(canonical: &str, aliases: &[&str]) -> MergeRule {
    MergeRule {
        canonical: canonical.to_string(),
        aliases: aliases.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rules_non_empty() {
        let rules = AliasRules::standard();
        assert_eq!(rules.exclude.len(), 6);
        assert_eq!(rules.rename.len(), 23);
        assert_eq!(rules.merge.len(), 10);
        assert!(!rules.is_empty());
    }

    #[test]
    fn test_none_rules_empty() {
        assert!(AliasRules::none().is_empty());
        assert_eq!(AliasRules::none().rule_count(), 0);
    }

    #[test]
    fn test_standard_rules_round_trip_json() {
        let rules = AliasRules::standard();
        let json = serde_json::to_string(&rules).unwrap();
        let back: AliasRules = serde_json::from_str(&json).unwrap();
        assert_eq!(rules, back);
    }

    #[test]
    fn test_standard_rename_targets_strip_suffix() {
        // 1对1规则的规范号均不带变体后缀
        for rule in AliasRules::standard().rename {
            assert!(!rule.canonical.contains("(free)"), "{}", rule.canonical);
            assert!(
                !rule.canonical.contains("(supplied materials)"),
                "{}",
                rule.canonical
            );
        }
    }
}
