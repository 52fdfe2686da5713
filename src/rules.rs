//! Keyword rules that drive automatic classification.
//!
//! Rules are kept in an ordered list per direction. Order is significant: the
//! classifier stops at the first rule with a matching keyword, so a store
//! built from a file preserves the file's order.

use crate::category::*;
use crate::error::Result;
use crate::transaction::Direction;
use serde::{Deserialize, Serialize};

/// One category together with the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub category: String,
    pub keywords: Vec<String>,
}

impl Rule {
    pub fn new(category: &str, keywords: &[&str]) -> Self {
        Rule {
            category: category.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Immutable rule table, partitioned by direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleStore {
    #[serde(default)]
    inflow: Vec<Rule>,
    #[serde(default)]
    outflow: Vec<Rule>,
}

impl RuleStore {
    pub fn new(inflow: Vec<Rule>, outflow: Vec<Rule>) -> Self {
        RuleStore { inflow, outflow }
    }

    /// A store with no rules; every note falls through to the defaults.
    pub fn empty() -> Self {
        RuleStore::new(Vec::new(), Vec::new())
    }

    /// Parses a rule file of the form:
    ///
    /// ```toml
    /// [[outflow]]
    /// category = "差旅费"
    /// keywords = ["出差", "机票"]
    /// ```
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Rules for `direction`, in match order.
    pub fn keywords_for(&self, direction: Direction) -> &[Rule] {
        match direction {
            Direction::Inflow => &self.inflow,
            Direction::Outflow => &self.outflow,
        }
    }
}

impl Default for RuleStore {
    fn default() -> Self {
        let outflow = vec![
            Rule::new(
                BUSINESS_ENTERTAINMENT,
                &["请客", "吃饭", "聚餐", "招待", "宴请", "烟酒", "礼品", "酒店住宿"],
            ),
            Rule::new(
                TRAVEL,
                &["出差", "机票", "高铁", "火车", "住宿", "打车", "滴滴", "行程"],
            ),
            Rule::new(
                OFFICE,
                &["纸", "笔", "复印", "耗材", "快递", "顺丰", "ERP", "订阅", "文具", "打印机"],
            ),
            Rule::new(
                STAFF_WELFARE,
                &["团建", "下午茶", "节日", "体检", "食堂", "外卖", "月饼"],
            ),
            Rule::new(PAYROLL, &["工资", "奖金", "绩效", "社保", "公积金", "加班费"]),
            Rule::new(
                VEHICLE,
                &["加油", "停车", "洗车", "车险", "维修", "保养", "油费"],
            ),
            Rule::new(
                CONSULTING,
                &["咨询", "法律", "财税", "VAT", "商标", "代理", "申报", "服务费"],
            ),
            Rule::new(RENT, &["房租", "租金", "物业", "仓库", "服务器", "AWS"]),
            Rule::new(
                ADVERTISING,
                &["佣金", "广告", "Facebook", "投流", "网红", "推广", "流量"],
            ),
            Rule::new(
                COST_OF_SALES,
                &["采购", "进货", "货款", "头程", "运费", "物流", "入仓"],
            ),
            Rule::new(
                FINANCE_CHARGES,
                &["手续费", "结汇", "提现", "汇兑", "银行", "转账"],
            ),
        ];

        let inflow = vec![
            Rule::new(NON_OPERATING_INCOME, &["补贴", "补助", "赔偿", "捐赠"]),
            Rule::new(OTHER_REVENUE, &["租金收入", "废料", "转租", "技术转让"]),
        ];

        RuleStore::new(inflow, outflow)
    }
}
